//! Conditional compilation of `#RANDOM`, `#IF` and `#SWITCH` blocks.
//!
//! [`ControlFlow`] is a stack machine fed with the control commands of a chart in source order.
//! It keeps two stacks:
//!
//! - the random values, one per nested `#RANDOM`, overwritten by `#SETRANDOM`;
//! - the condition frames, one per open `#IF` or `#SWITCH` block.
//!
//! A line is active when every condition frame is active. Control commands themselves are always
//! applied, even inside inactive regions, so that the nesting stays balanced.
//!
//! Malformed nesting, such as an `#ELSE` outside of any `#IF`, changes nothing and is reported as
//! [`ParseWarning::UnexpectedControlFlow`].

use crate::bms::{lex::token::ControlCommand, parse::ParseWarning, rng::Rng};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameKind {
    If,
    Switch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frame {
    kind: FrameKind,
    parent_active: bool,
    current_active: bool,
    matched_branch: bool,
    switch_value: Option<i64>,
}

/// The state of conditional compilation through one parse.
#[derive(Debug, Clone)]
pub struct ControlFlow<R> {
    rng: R,
    randoms: Vec<Option<i64>>,
    frames: Vec<Frame>,
}

impl<R: Rng> ControlFlow<R> {
    /// Creates a new state which resolves `#RANDOM` with `rng`.
    pub const fn new(rng: R) -> Self {
        Self {
            rng,
            randoms: Vec::new(),
            frames: Vec::new(),
        }
    }

    /// Returns whether lines at the current position should be read.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.frames.iter().all(|frame| frame.current_active)
    }

    /// Returns the innermost random value, or `None` if it is unresolved or there is no
    /// `#RANDOM` block.
    #[must_use]
    pub fn random_value(&self) -> Option<i64> {
        self.randoms.last().copied().flatten()
    }

    /// Returns the number of open `#IF` and `#SWITCH` blocks.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Applies a control command.
    ///
    /// # Errors
    ///
    /// Returns [`ParseWarning::UnexpectedControlFlow`] when the command does not fit the current
    /// nesting. The state is left unchanged in that case.
    pub fn apply(&mut self, command: ControlCommand) -> Result<(), ParseWarning> {
        match command {
            ControlCommand::Random(max) => {
                let value = self.resolve_random(max);
                self.randoms.push(value);
            }
            ControlCommand::SetRandom(value) => {
                let value = Some(value.unwrap_or(1));
                match self.randoms.last_mut() {
                    Some(top) => *top = value,
                    None => self.randoms.push(value),
                }
            }
            ControlCommand::EndRandom => {
                self.randoms.pop().ok_or(ParseWarning::UnexpectedControlFlow(
                    "#ENDRANDOM without #RANDOM",
                ))?;
            }
            ControlCommand::If(target) => {
                let parent_active = self.is_active();
                let current_active = parent_active && self.evaluate_condition(target);
                self.frames.push(Frame {
                    kind: FrameKind::If,
                    parent_active,
                    current_active,
                    matched_branch: current_active,
                    switch_value: None,
                });
            }
            ControlCommand::ElseIf(target) => {
                let condition = self.evaluate_condition(target);
                let frame = self.top_frame(FrameKind::If, "#ELSEIF outside of #IF block")?;
                if !frame.parent_active || frame.matched_branch {
                    frame.current_active = false;
                } else {
                    frame.current_active = condition;
                    frame.matched_branch = condition;
                }
            }
            ControlCommand::Else => {
                let frame = self.top_frame(FrameKind::If, "#ELSE outside of #IF block")?;
                Self::enter_fallback(frame);
            }
            ControlCommand::EndIf => {
                self.top_frame(FrameKind::If, "#ENDIF without #IF")?;
                self.frames.pop();
            }
            ControlCommand::Switch(value) => {
                let parent_active = self.is_active();
                let switch_value = value.or_else(|| self.random_value());
                self.frames.push(Frame {
                    kind: FrameKind::Switch,
                    parent_active,
                    current_active: false,
                    matched_branch: false,
                    switch_value,
                });
            }
            ControlCommand::Case(value) => {
                let frame = self.top_frame(FrameKind::Switch, "#CASE outside of #SWITCH block")?;
                if frame.parent_active
                    && !frame.matched_branch
                    && value.is_some()
                    && value == frame.switch_value
                {
                    frame.current_active = true;
                    frame.matched_branch = true;
                } else {
                    frame.current_active = false;
                }
            }
            ControlCommand::Default => {
                let frame =
                    self.top_frame(FrameKind::Switch, "#DEFAULT outside of #SWITCH block")?;
                Self::enter_fallback(frame);
            }
            ControlCommand::EndSwitch => {
                self.top_frame(FrameKind::Switch, "#ENDSWITCH without #SWITCH")?;
                self.frames.pop();
            }
        }
        Ok(())
    }

    fn resolve_random(&mut self, max: Option<i64>) -> Option<i64> {
        match max {
            None => Some(1),
            Some(max) if max > 0 => {
                let max = u64::try_from(max).ok()?;
                i64::try_from(self.rng.generate(1..=max)).ok()
            }
            Some(_) => None,
        }
    }

    fn evaluate_condition(&self, target: Option<i64>) -> bool {
        match self.random_value() {
            Some(random) => target == Some(random),
            None => target.is_some_and(|target| target != 0),
        }
    }

    fn top_frame(
        &mut self,
        kind: FrameKind,
        message: &'static str,
    ) -> Result<&mut Frame, ParseWarning> {
        self.frames
            .last_mut()
            .filter(|frame| frame.kind == kind)
            .ok_or(ParseWarning::UnexpectedControlFlow(message))
    }

    fn enter_fallback(frame: &mut Frame) {
        if !frame.parent_active || frame.matched_branch {
            frame.current_active = false;
        } else {
            frame.current_active = true;
            frame.matched_branch = true;
        }
    }
}
