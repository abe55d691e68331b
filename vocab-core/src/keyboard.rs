use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::debug;

use crate::SessionToken;

/// Sessions currently listening for key presses. A listener stays registered
/// exactly as long as its `KeyboardSubscription` is alive.
#[derive(Debug, Clone, Default)]
pub struct KeyboardListeners {
    tokens: Rc<RefCell<Vec<SessionToken>>>,
}

impl KeyboardListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, token: SessionToken) -> KeyboardSubscription {
        self.tokens.borrow_mut().push(token);
        debug!("Keyboard listener added for session token {}", token.value());
        KeyboardSubscription {
            token,
            tokens: Rc::downgrade(&self.tokens),
        }
    }

    pub fn is_subscribed(&self, token: SessionToken) -> bool {
        self.tokens.borrow().contains(&token)
    }

    pub fn len(&self) -> usize {
        self.tokens.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.borrow().is_empty()
    }
}

#[derive(Debug)]
pub struct KeyboardSubscription {
    token: SessionToken,
    tokens: Weak<RefCell<Vec<SessionToken>>>,
}

impl KeyboardSubscription {
    pub fn token(&self) -> SessionToken {
        self.token
    }
}

impl Drop for KeyboardSubscription {
    fn drop(&mut self) {
        if let Some(tokens) = self.tokens.upgrade() {
            let mut tokens = tokens.borrow_mut();
            if let Some(position) = tokens.iter().position(|t| *t == self.token) {
                tokens.remove(position);
                debug!("Keyboard listener removed for session token {}", self.token.value());
            }
        }
    }
}
