use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Handler = Rc<dyn Fn(&str)>;

thread_local! {
    static ALERT_HANDLER: RefCell<Option<Handler>> = const { RefCell::new(None) };
}

/// Keeps a handler installed. Dropping it puts back the handler it replaced,
/// provided that one's owner is still alive; if another handler has been
/// installed since, that one stays.
#[must_use = "the handler is removed when the guard drops"]
pub struct AlertHandlerGuard {
    installed: Handler,
    previous: Option<Weak<dyn Fn(&str)>>,
}

/// Installs the platform's blocking alert for this thread.
pub fn set_alert_handler(f: impl Fn(&str) + 'static) -> AlertHandlerGuard {
    let installed: Handler = Rc::new(f);
    let previous = ALERT_HANDLER.with(|h| h.borrow_mut().replace(installed.clone()));
    AlertHandlerGuard {
        installed,
        previous: previous.as_ref().map(Rc::downgrade),
    }
}

impl Drop for AlertHandlerGuard {
    fn drop(&mut self) {
        ALERT_HANDLER.with(|h| {
            let mut current = h.borrow_mut();
            let ours = current
                .as_ref()
                .is_some_and(|c| Rc::ptr_eq(c, &self.installed));
            if ours {
                *current = self.previous.as_ref().and_then(Weak::upgrade);
            }
        });
    }
}

/// Shows a user-facing message the user has to acknowledge.
///
/// Without an installed platform handler the message is only logged.
pub fn alert(message: impl AsRef<str>) {
    let message = message.as_ref();
    log::warn!("alert: {message}");
    let handler = ALERT_HANDLER.with(|h| h.borrow().clone());
    if let Some(handler) = handler {
        handler(message);
    }
}
