//! Rolling vote buffer for classification stability
//!
//! Holds the last N per-frame classifications in a fixed ring. A label
//! becomes current only when it holds a strict majority of a full buffer.

use super::model::ExerciseKind;

#[derive(Clone, Debug)]
pub struct VoteBuffer {
    /// Circular buffer of per-frame labels (None = nothing matched)
    data: Vec<Option<ExerciseKind>>,

    /// Current write position (points to next slot to write)
    write_index: usize,

    /// Whether buffer has been filled at least once
    filled: bool,
}

impl VoteBuffer {
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![None; size.max(1)],
            write_index: 0,
            filled: false,
        }
    }

    pub fn push(&mut self, label: Option<ExerciseKind>) {
        self.data[self.write_index] = label;
        self.write_index = (self.write_index + 1) % self.data.len();

        // Mark as filled when we wrap around
        if self.write_index == 0 {
            self.filled = true;
        }
    }

    pub fn is_ready(&self) -> bool {
        self.filled
    }

    pub fn frame_count(&self) -> usize {
        if self.filled {
            self.data.len()
        } else {
            self.write_index
        }
    }

    /// Label holding a strict majority of a full buffer
    pub fn majority(&self) -> Option<ExerciseKind> {
        if !self.filled {
            return None;
        }
        let needed = self.data.len() / 2 + 1;
        ExerciseKind::TIE_BREAK_ORDER.into_iter().find(|kind| {
            self.data.iter().filter(|label| **label == Some(*kind)).count() >= needed
        })
    }

    pub fn clear(&mut self) {
        self.data.iter_mut().for_each(|slot| *slot = None);
        self.write_index = 0;
        self.filled = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_full_buffer() {
        let mut buf = VoteBuffer::new(2);
        buf.push(Some(ExerciseKind::Squat));
        assert!(!buf.is_ready());
        assert_eq!(buf.majority(), None);
        buf.push(Some(ExerciseKind::Squat));
        assert_eq!(buf.majority(), Some(ExerciseKind::Squat));
    }

    #[test]
    fn test_disagreement_has_no_majority() {
        let mut buf = VoteBuffer::new(2);
        buf.push(Some(ExerciseKind::Squat));
        buf.push(Some(ExerciseKind::BicepCurl));
        assert_eq!(buf.majority(), None);
        buf.push(Some(ExerciseKind::BicepCurl));
        assert_eq!(buf.majority(), Some(ExerciseKind::BicepCurl));
    }

    #[test]
    fn test_majority_of_five() {
        let mut buf = VoteBuffer::new(5);
        for label in [
            Some(ExerciseKind::PushUp),
            None,
            Some(ExerciseKind::PushUp),
            Some(ExerciseKind::Squat),
            Some(ExerciseKind::PushUp),
        ] {
            buf.push(label);
        }
        assert_eq!(buf.frame_count(), 5);
        assert_eq!(buf.majority(), Some(ExerciseKind::PushUp));
    }

    #[test]
    fn test_clear() {
        let mut buf = VoteBuffer::new(2);
        buf.push(Some(ExerciseKind::Squat));
        buf.push(Some(ExerciseKind::Squat));
        buf.clear();
        assert_eq!(buf.frame_count(), 0);
        assert_eq!(buf.majority(), None);
    }
}
