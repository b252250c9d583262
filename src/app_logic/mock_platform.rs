/*
 * Test doubles for the platform layer: an in-memory message queue and
 * windowing backend, and a renderer that can feed messages back into the queue
 * after a given number of idle frames. Everything they observe is written to a
 * shared journal so tests can assert on the exact order of calls.
 */
use crate::platform_layer::{
    ClassAtom, DefaultMessageHandler, FrameRenderer, MessageCode, MessageQueue, MessageRecord,
    PlatformError, PlatformResult, QuitSignal, ShowCommand, WindowClassDescriptor, WindowConfig,
    WindowHandle, WindowProcedure, WindowingPlatform,
};

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

// Polls beyond this are treated as a runaway loop.
const MAX_POLLS: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Journal {
    Peek,
    Poll(Option<MessageCode>),
    Translate(MessageCode),
    Dispatch(MessageCode),
    DefaultHandled(MessageCode),
    QuitPosted(i32),
    Update,
    Render,
    Present,
    RegisterClass(String),
    CreateWindow(String),
    ShowWindow(WindowHandle, ShowCommand),
}

type SharedJournal = Rc<RefCell<Vec<Journal>>>;
type SharedQueue = Rc<RefCell<VecDeque<MessageRecord>>>;

// Default handler and quit signal handed to procedures dispatched by the mock.
struct MockServices {
    journal: SharedJournal,
    queue: SharedQueue,
}

impl DefaultMessageHandler for MockServices {
    fn default_window_message(
        &self,
        _window: WindowHandle,
        code: MessageCode,
        _wparam: usize,
        _lparam: isize,
    ) -> isize {
        self.journal.borrow_mut().push(Journal::DefaultHandled(code));
        0
    }
}

impl QuitSignal for MockServices {
    fn post_quit(&self, exit_code: i32) {
        self.journal.borrow_mut().push(Journal::QuitPosted(exit_code));
        self.queue.borrow_mut().push_back(MessageRecord::new(
            WindowHandle::NONE,
            MessageCode::QUIT,
            exit_code as usize,
            0,
        ));
    }
}

pub(crate) struct MockPlatform {
    journal: SharedJournal,
    queue: SharedQueue,
    procedure: Option<WindowProcedure>,
    registered_class: Option<String>,
    polls: usize,
    pub(crate) fail_register: bool,
    pub(crate) fail_create: bool,
    pub(crate) window: WindowHandle,
    pub(crate) registered: Vec<WindowClassDescriptor>,
    pub(crate) created: Vec<WindowConfig>,
}

impl MockPlatform {
    pub(crate) fn new() -> Self {
        MockPlatform {
            journal: Rc::new(RefCell::new(Vec::new())),
            queue: Rc::new(RefCell::new(VecDeque::new())),
            procedure: None,
            registered_class: None,
            polls: 0,
            fail_register: false,
            fail_create: false,
            window: WindowHandle::from_raw(0xA11),
            registered: Vec::new(),
            created: Vec::new(),
        }
    }

    pub(crate) fn enqueue(&self, message: MessageRecord) {
        self.queue.borrow_mut().push_back(message);
    }

    pub(crate) fn attach_procedure(&mut self, procedure: WindowProcedure) {
        self.procedure = Some(procedure);
    }

    pub(crate) fn journal(&self) -> Vec<Journal> {
        self.journal.borrow().clone()
    }

    pub(crate) fn pending(&self) -> usize {
        self.queue.borrow().len()
    }
}

impl MessageQueue for MockPlatform {
    fn peek(&mut self) -> Option<MessageRecord> {
        self.journal.borrow_mut().push(Journal::Peek);
        self.queue.borrow().front().copied()
    }

    fn poll(&mut self) -> Option<MessageRecord> {
        self.polls += 1;
        assert!(self.polls <= MAX_POLLS, "message loop did not terminate");
        let message = self.queue.borrow_mut().pop_front();
        self.journal
            .borrow_mut()
            .push(Journal::Poll(message.map(|m| m.code)));
        message
    }

    fn translate(&mut self, message: &MessageRecord) {
        self.journal
            .borrow_mut()
            .push(Journal::Translate(message.code));
    }

    fn dispatch(&mut self, message: &MessageRecord) -> isize {
        self.journal.borrow_mut().push(Journal::Dispatch(message.code));
        match self.procedure {
            Some(procedure) => {
                let services = MockServices {
                    journal: Rc::clone(&self.journal),
                    queue: Rc::clone(&self.queue),
                };
                procedure(message.window, *message, &services, &services)
            }
            None => 0,
        }
    }
}

impl WindowingPlatform for MockPlatform {
    fn register_class(&mut self, descriptor: &WindowClassDescriptor) -> PlatformResult<ClassAtom> {
        self.journal
            .borrow_mut()
            .push(Journal::RegisterClass(descriptor.class_name.clone()));
        self.registered.push(descriptor.clone());
        if self.fail_register {
            return Err(PlatformError::ClassRegistrationFailed(
                "mocked registration failure".to_string(),
            ));
        }
        self.registered_class = Some(descriptor.class_name.clone());
        self.procedure = Some(descriptor.procedure);
        Ok(ClassAtom(0xC001))
    }

    fn create_window(&mut self, config: &WindowConfig) -> PlatformResult<WindowHandle> {
        self.journal
            .borrow_mut()
            .push(Journal::CreateWindow(config.class_name.clone()));
        self.created.push(config.clone());
        if self.fail_create {
            return Err(PlatformError::WindowCreationFailed(
                "mocked creation failure".to_string(),
            ));
        }
        if self.registered_class.as_deref() != Some(config.class_name.as_str()) {
            return Err(PlatformError::WindowCreationFailed(format!(
                "class '{}' not registered",
                config.class_name
            )));
        }
        Ok(self.window)
    }

    fn show_window(&mut self, window: WindowHandle, command: ShowCommand) {
        self.journal
            .borrow_mut()
            .push(Journal::ShowWindow(window, command));
    }
}

// A renderer that journals each step and can inject messages after a frame.
pub(crate) struct ScriptedRenderer {
    journal: SharedJournal,
    queue: SharedQueue,
    frames: u64,
    injections: Vec<(u64, MessageRecord)>,
}

impl ScriptedRenderer {
    pub(crate) fn new(platform: &MockPlatform) -> Self {
        ScriptedRenderer {
            journal: Rc::clone(&platform.journal),
            queue: Rc::clone(&platform.queue),
            frames: 0,
            injections: Vec::new(),
        }
    }

    pub(crate) fn inject_after_frame(&mut self, frame: u64, message: MessageRecord) {
        self.injections.push((frame, message));
    }
}

impl FrameRenderer for ScriptedRenderer {
    fn update(&mut self) {
        self.journal.borrow_mut().push(Journal::Update);
    }

    fn render(&mut self) {
        self.journal.borrow_mut().push(Journal::Render);
    }

    fn present(&mut self) {
        self.journal.borrow_mut().push(Journal::Present);
        self.frames += 1;
        for (frame, message) in &self.injections {
            if *frame == self.frames {
                self.queue.borrow_mut().push_back(*message);
            }
        }
    }
}
