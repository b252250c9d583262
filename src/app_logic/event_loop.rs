/*
 * The idle-processing message loop.
 *
 * Each iteration polls the thread's queue without blocking. A retrieved message
 * is translated and dispatched (running the target window's procedure
 * synchronously); an empty queue runs one frame of idle work on the
 * `FrameRenderer`. The loop ends as soon as a quit message is retrieved and
 * reports that message's payload as the exit code.
 */
use crate::platform_layer::{FrameRenderer, MessageQueue, MessageRecord};

/// Summary of one run of the message loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopOutcome {
    pub exit_code: i32,
    pub dispatched: u64,
    pub idle_frames: u64,
}

pub fn run_message_loop<Q, R>(queue: &mut Q, renderer: &mut R) -> LoopOutcome
where
    Q: MessageQueue + ?Sized,
    R: FrameRenderer + ?Sized,
{
    let mut dispatched: u64 = 0;
    let mut idle_frames: u64 = 0;

    // Advisory only: it removes nothing, and the first poll below re-reads the queue.
    if let Some(pending) = queue.peek() {
        log::trace!("EventLoop: Message pending before first poll: {:?}", pending.code);
    }

    // Last record retrieved from the queue; the loop ends once it is a quit.
    let mut current = MessageRecord::null();
    while !current.is_quit() {
        match queue.poll() {
            Some(message) => {
                current = message;
                if !current.is_quit() {
                    queue.translate(&current);
                    queue.dispatch(&current);
                    dispatched += 1;
                }
            }
            None => {
                renderer.update();
                renderer.render();
                renderer.present();
                idle_frames += 1;
            }
        }
    }
    // The payload is the value passed to the quit request, truncated back to the
    // width it was posted with.
    let exit_code = current.wparam as i32;

    log::debug!(
        "EventLoop: Quit received after {dispatched} dispatched messages and {idle_frames} idle frames."
    );
    LoopOutcome {
        exit_code,
        dispatched,
        idle_frames,
    }
}
