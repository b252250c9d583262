use super::error::{PlatformError, Result as PlatformResult};
use super::types::{
    BackgroundBrush, ClassAtom, CursorSource, DefaultMessageHandler, IconSource, MessageCode,
    MessageRecord, QuitSignal, WindowClassDescriptor, WindowConfig, WindowHandle, WindowPosition,
    WindowProcedure, WindowStyle,
};

use windows::{
    Win32::{
        Foundation::{GetLastError, HINSTANCE, HWND, LPARAM, LRESULT, POINT, WPARAM},
        Graphics::Gdi::{BLACK_BRUSH, GetStockObject, HBRUSH},
        UI::WindowsAndMessaging::*,
    },
    core::{HSTRING, PCWSTR},
};

use std::ffi::c_void;

/// The capabilities handed to every window procedure on Win32.
pub(crate) struct NativeMessageServices;

impl DefaultMessageHandler for NativeMessageServices {
    fn default_window_message(
        &self,
        window: WindowHandle,
        code: MessageCode,
        wparam: usize,
        lparam: isize,
    ) -> isize {
        unsafe {
            DefWindowProcW(
                hwnd_from_handle(window),
                code.0,
                WPARAM(wparam),
                LPARAM(lparam),
            )
        }
        .0
    }
}

impl QuitSignal for NativeMessageServices {
    fn post_quit(&self, exit_code: i32) {
        unsafe { PostQuitMessage(exit_code) };
    }
}

#[inline]
pub(crate) fn hwnd_from_handle(window: WindowHandle) -> HWND {
    HWND(window.as_raw() as *mut c_void)
}

#[inline]
pub(crate) fn handle_from_hwnd(hwnd: HWND) -> WindowHandle {
    WindowHandle::from_raw(hwnd.0 as usize)
}

pub(crate) fn record_from_native(msg: &MSG) -> MessageRecord {
    MessageRecord {
        window: handle_from_hwnd(msg.hwnd),
        code: MessageCode(msg.message),
        wparam: msg.wParam.0,
        lparam: msg.lParam.0,
        time: msg.time,
        point: (msg.pt.x, msg.pt.y),
    }
}

pub(crate) fn native_from_record(record: &MessageRecord) -> MSG {
    MSG {
        hwnd: hwnd_from_handle(record.window),
        message: record.code.0,
        wParam: WPARAM(record.wparam),
        lParam: LPARAM(record.lparam),
        time: record.time,
        pt: POINT {
            x: record.point.0,
            y: record.point.1,
        },
    }
}

fn load_icon(icon: IconSource) -> PlatformResult<HICON> {
    match icon {
        IconSource::Application => Ok(unsafe { LoadIconW(None, IDI_APPLICATION)? }),
    }
}

fn load_cursor(cursor: CursorSource) -> PlatformResult<HCURSOR> {
    match cursor {
        CursorSource::Arrow => Ok(unsafe { LoadCursorW(None, IDC_ARROW)? }),
    }
}

fn stock_brush(background: BackgroundBrush) -> HBRUSH {
    match background {
        BackgroundBrush::Black => HBRUSH(unsafe { GetStockObject(BLACK_BRUSH) }.0),
    }
}

/// Registers a window class described by `descriptor`.
///
/// Every class registered here routes its messages through
/// `facade_wnd_proc_router`; the descriptor's own procedure is attached to each
/// window at creation time. Registering the same class name twice is left to
/// the OS to reject.
pub(crate) fn register_window_class(
    h_instance: HINSTANCE,
    descriptor: &WindowClassDescriptor,
) -> PlatformResult<ClassAtom> {
    let class_name_hstring = HSTRING::from(descriptor.class_name.as_str());
    let menu_name_hstring = descriptor.menu_name.as_deref().map(HSTRING::from);

    let wc = WNDCLASSEXW {
        cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
        style: WNDCLASS_STYLES(descriptor.style),
        lpfnWndProc: Some(facade_wnd_proc_router),
        cbClsExtra: 0,
        cbWndExtra: 0, // We use GWLP_USERDATA for the per-window procedure
        hInstance: h_instance,
        hIcon: load_icon(descriptor.icon)?,
        hCursor: load_cursor(descriptor.cursor)?,
        hbrBackground: stock_brush(descriptor.background),
        lpszMenuName: menu_name_hstring
            .as_ref()
            .map_or(PCWSTR::null(), |name| PCWSTR(name.as_ptr())),
        lpszClassName: PCWSTR(class_name_hstring.as_ptr()),
        hIconSm: match descriptor.small_icon {
            Some(icon) => load_icon(icon)?,
            None => HICON::default(),
        },
    };

    let atom = unsafe { RegisterClassExW(&wc) };
    if atom == 0 {
        let error = unsafe { GetLastError() };
        Err(PlatformError::ClassRegistrationFailed(format!(
            "RegisterClassExW for '{}' failed: {:?}",
            descriptor.class_name, error
        )))
    } else {
        Ok(ClassAtom(atom))
    }
}

/// Creates a native top-level window and attaches `procedure` to it.
pub(crate) fn create_native_window(
    h_instance: HINSTANCE,
    config: &WindowConfig,
    procedure: WindowProcedure,
) -> PlatformResult<HWND> {
    let (x, y) = match config.position {
        WindowPosition::Default => (CW_USEDEFAULT, CW_USEDEFAULT),
    };
    let style = match config.style {
        WindowStyle::OverlappedWindow => WS_OVERLAPPEDWINDOW,
    };

    // The procedure pointer is the creation context. It is `Copy` and lives for
    // the whole program, so nothing has to be reclaimed on WM_NCDESTROY.
    let creation_context = procedure as *const c_void;

    let hwnd = unsafe {
        CreateWindowExW(
            WINDOW_EX_STYLE::default(),                        // dwExStyle
            &HSTRING::from(config.class_name.as_str()),        // lpClassName
            &HSTRING::from(config.title.as_str()),             // lpWindowName
            style,                                             // dwStyle
            x,                                                 // X
            y,                                                 // Y
            config.width,                                      // nWidth
            config.height,                                     // nHeight
            None,                                              // hWndParent
            None,                                              // hMenu
            Some(h_instance),                                  // hInstance
            Some(creation_context),                            // lpParam
        )
    }
    .map_err(|e| PlatformError::WindowCreationFailed(format!("CreateWindowExW failed: {e}")))?;

    if hwnd.is_invalid() {
        return Err(PlatformError::WindowCreationFailed(
            "CreateWindowExW returned a null window handle".to_string(),
        ));
    }
    Ok(hwnd)
}

fn procedure_from_raw(raw: usize) -> Option<WindowProcedure> {
    if raw == 0 {
        None
    } else {
        // Only values produced by `create_native_window` are ever stored.
        Some(unsafe { std::mem::transmute::<usize, WindowProcedure>(raw) })
    }
}

/// The window procedure registered with the OS for every class of this layer.
///
/// On WM_NCCREATE it stores the procedure passed through `lpCreateParams` in
/// GWLP_USERDATA; every later message is routed to that procedure together with
/// the native default handler and quit signal. Messages arriving before
/// WM_NCCREATE or after WM_NCDESTROY go straight to `DefWindowProcW`.
unsafe extern "system" fn facade_wnd_proc_router(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let procedure = if msg == WM_NCCREATE {
        let create_struct = unsafe { &*(lparam.0 as *const CREATESTRUCTW) };
        let raw = create_struct.lpCreateParams as usize;
        unsafe { SetWindowLongPtrW(hwnd, GWLP_USERDATA, raw as isize) };
        procedure_from_raw(raw)
    } else {
        procedure_from_raw(unsafe { GetWindowLongPtrW(hwnd, GWLP_USERDATA) } as usize)
    };

    let Some(procedure) = procedure else {
        return unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) };
    };

    let window = handle_from_hwnd(hwnd);
    let record = MessageRecord::new(window, MessageCode(msg), wparam.0, lparam.0);
    let result = procedure(
        window,
        record,
        &NativeMessageServices,
        &NativeMessageServices,
    );

    if msg == WM_NCDESTROY {
        unsafe { SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0) };
    }

    LRESULT(result)
}
