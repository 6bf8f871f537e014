// src/process/slot.rs

/// Holds at most one process handle.
///
/// [`ProcessSlot::replace`] drops the previous handle before storing the new
/// one, so a superseded handle is always released and never reused.
#[derive(Debug)]
pub struct ProcessSlot<P> {
    current: Option<P>,
}

impl<P> Default for ProcessSlot<P> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<P> ProcessSlot<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    pub fn get(&self) -> Option<&P> {
        self.current.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut P> {
        self.current.as_mut()
    }

    /// Release the held handle (if any), then hold `process`.
    pub fn replace(&mut self, process: P) {
        drop(self.current.take());
        self.current = Some(process);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    struct Tracked {
        id: u32,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.log.borrow_mut().push(format!("close {}", self.id));
        }
    }

    #[test]
    fn replace_closes_previous_handle_first() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut slot = ProcessSlot::new();
        assert!(slot.is_empty());

        slot.replace(Tracked { id: 1, log: Rc::clone(&log) });
        assert!(log.borrow().is_empty());

        slot.replace(Tracked { id: 2, log: Rc::clone(&log) });
        assert_eq!(*log.borrow(), vec!["close 1".to_string()]);
        assert_eq!(slot.get().map(|t| t.id), Some(2));

        drop(slot);
        assert_eq!(
            *log.borrow(),
            vec!["close 1".to_string(), "close 2".to_string()]
        );
    }
}
