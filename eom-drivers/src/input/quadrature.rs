//! Rotary encoder decoding
//!
//! Decodes quadrature signals with a state machine that only counts a
//! detent after a full A/B sequence, so contact bounce on one line
//! returns to idle instead of producing steps.

/// Decoder states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    CwStep1,
    CwStep2,
    CcwStep1,
    CcwStep2,
}

/// Quadrature encoder decoder
#[derive(Debug, Clone)]
pub struct QuadratureDecoder {
    state: State,
    last_a: bool,
    last_b: bool,
}

impl QuadratureDecoder {
    /// Create a decoder from the current line levels
    pub fn new(a: bool, b: bool) -> Self {
        Self {
            state: State::Idle,
            last_a: a,
            last_b: b,
        }
    }

    /// Feed the current line levels
    ///
    /// Returns `+1` for a clockwise detent and `-1` for counter-clockwise.
    pub fn update(&mut self, a: bool, b: bool) -> Option<i32> {
        if a == self.last_a && b == self.last_b {
            return None;
        }
        self.last_a = a;
        self.last_b = b;
        self.decode(a, b)
    }

    /// CW:  (1,1) -> (0,1) -> (0,0) -> either high
    /// CCW: (1,1) -> (1,0) -> (0,0) -> either high
    fn decode(&mut self, a: bool, b: bool) -> Option<i32> {
        match self.state {
            State::Idle => {
                if !a && b {
                    self.state = State::CwStep1;
                } else if a && !b {
                    self.state = State::CcwStep1;
                }
                None
            }
            State::CwStep1 | State::CcwStep1 => {
                if !a && !b {
                    self.state = if self.state == State::CwStep1 {
                        State::CwStep2
                    } else {
                        State::CcwStep2
                    };
                } else if a && b {
                    // Bounce
                    self.state = State::Idle;
                }
                None
            }
            State::CwStep2 if a || b => {
                self.state = State::Idle;
                Some(1)
            }
            State::CcwStep2 if a || b => {
                self.state = State::Idle;
                Some(-1)
            }
            State::CwStep2 | State::CcwStep2 => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn feed(decoder: &mut QuadratureDecoder, seq: &[(bool, bool)]) -> i32 {
        seq.iter()
            .filter_map(|&(a, b)| decoder.update(a, b))
            .sum()
    }

    #[test]
    fn test_clockwise_detent() {
        let mut decoder = QuadratureDecoder::new(true, true);
        let steps = feed(
            &mut decoder,
            &[(false, true), (false, false), (true, false), (true, true)],
        );
        assert_eq!(steps, 1);
    }

    #[test]
    fn test_counter_clockwise_detent() {
        let mut decoder = QuadratureDecoder::new(true, true);
        let steps = feed(
            &mut decoder,
            &[(true, false), (false, false), (false, true), (true, true)],
        );
        assert_eq!(steps, -1);
    }

    #[test]
    fn test_bounce_rejected() {
        let mut decoder = QuadratureDecoder::new(true, true);
        let steps = feed(
            &mut decoder,
            &[(false, true), (true, true), (false, true), (true, true)],
        );
        assert_eq!(steps, 0);
    }

    #[test]
    fn test_repeated_levels_ignored() {
        let mut decoder = QuadratureDecoder::new(true, true);
        assert_eq!(decoder.update(true, true), None);
        assert_eq!(decoder.update(false, true), None);
        assert_eq!(decoder.update(false, true), None);
    }

    const CW: [(bool, bool); 4] = [(false, true), (false, false), (true, false), (true, true)];
    const CCW: [(bool, bool); 4] = [(true, false), (false, false), (false, true), (true, true)];

    proptest! {
        #[test]
        fn prop_full_detents_count_exactly(turns in proptest::collection::vec(any::<bool>(), 0..64)) {
            let mut decoder = QuadratureDecoder::new(true, true);
            let mut expected = 0;
            let mut total = 0;
            for clockwise in turns {
                let (seq, step) = if clockwise { (&CW, 1) } else { (&CCW, -1) };
                expected += step;
                total += feed(&mut decoder, seq);
            }
            prop_assert_eq!(total, expected);
        }
    }
}
