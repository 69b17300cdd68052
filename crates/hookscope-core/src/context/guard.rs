//! Scoped push/pop of frames

use std::cell::RefCell;

use tracing::warn;

use super::frame::Frame;

/// Keeps one frame on the stack for as long as it lives.
///
/// The frame is popped either explicitly through [`FrameGuard::pop`] or, if
/// the wrapped closure unwinds, when the guard is dropped.
pub(crate) struct FrameGuard<'a, M> {
    stack: &'a RefCell<Vec<Frame<M>>>,
    depth: usize,
    armed: bool,
}

impl<'a, M> FrameGuard<'a, M> {
    pub(crate) fn push(stack: &'a RefCell<Vec<Frame<M>>>, frame: Frame<M>) -> Self {
        let depth = {
            let mut frames = stack.borrow_mut();
            frames.push(frame);
            frames.len()
        };

        Self {
            stack,
            depth,
            armed: true,
        }
    }

    /// Depth of the stack including the guarded frame
    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    /// Pop the guarded frame and hand it back.
    pub(crate) fn pop(mut self) -> Option<Frame<M>> {
        self.armed = false;
        let mut detached = self.detach()?;
        detached.truncate(1);
        detached.pop()
    }

    /// Split off the guarded frame and anything above it. The returned frames
    /// are dropped by the caller after the stack borrow is released.
    fn detach(&self) -> Option<Vec<Frame<M>>> {
        let mut frames = match self.stack.try_borrow_mut() {
            Ok(frames) => frames,
            Err(_) => {
                warn!(depth = self.depth, "hooks stack busy, frame left in place");
                return None;
            }
        };

        if frames.len() < self.depth {
            warn!(
                expected = self.depth,
                actual = frames.len(),
                "hooks frame already popped"
            );
            return None;
        }
        if frames.len() > self.depth {
            warn!(
                expected = self.depth,
                actual = frames.len(),
                "discarding frames left above the current one"
            );
        }

        Some(frames.split_off(self.depth - 1))
    }
}

impl<M> Drop for FrameGuard<'_, M> {
    fn drop(&mut self) {
        if self.armed {
            let _frames = self.detach();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::MetaMap;

    #[test]
    fn test_push_and_pop() {
        let stack = RefCell::new(Vec::new());
        let guard = FrameGuard::push(&stack, Frame::new(MetaMap::new()));
        assert_eq!(guard.depth(), 1);
        assert_eq!(stack.borrow().len(), 1);

        assert!(guard.pop().is_some());
        assert!(stack.borrow().is_empty());
    }

    #[test]
    fn test_drop_pops() {
        let stack = RefCell::new(Vec::new());
        {
            let _outer = FrameGuard::push(&stack, Frame::new(MetaMap::new()));
            let _inner = FrameGuard::push(&stack, Frame::new(MetaMap::new()));
            assert_eq!(stack.borrow().len(), 2);
        }
        assert!(stack.borrow().is_empty());
    }

    #[test]
    fn test_pop_discards_frames_above() {
        let stack = RefCell::new(Vec::new());
        let guard = FrameGuard::push(&stack, Frame::new(MetaMap::new()));
        let stray = FrameGuard::push(&stack, Frame::new(MetaMap::new()));
        std::mem::forget(stray);

        assert!(guard.pop().is_some());
        assert!(stack.borrow().is_empty());
    }

    #[test]
    fn test_pop_after_frame_removed() {
        let stack = RefCell::new(Vec::new());
        let guard = FrameGuard::push(&stack, Frame::new(MetaMap::new()));
        stack.borrow_mut().clear();

        assert!(guard.pop().is_none());
        assert!(stack.borrow().is_empty());
    }
}
