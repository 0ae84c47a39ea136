use std::{collections::VecDeque, fmt, rc::Rc};

use crate::animation::ease::Ease;

/// Callback fired by [`Action::Run`].
pub type ActionCallback = Rc<dyn Fn()>;

/// A timed change applied to a node, interpreted frame by frame by the host.
///
/// Actions are plain descriptions; nothing happens until they are handed to
/// [`crate::Node::run_action`] and the presenting view advances time.
#[derive(Clone)]
pub enum Action {
    /// Interpolate the node's alpha from its value when the step starts to `alpha`.
    FadeAlphaTo {
        /// Target alpha in `[0, 1]`.
        alpha: f64,
        /// Step length in seconds.
        duration_secs: f64,
        /// Timing curve.
        ease: Ease,
    },
    /// Do nothing for a while.
    Wait {
        /// Step length in seconds.
        duration_secs: f64,
    },
    /// Invoke a callback, taking no time.
    Run(ActionCallback),
    /// Run actions one after the other.
    Sequence(Vec<Action>),
}

impl Action {
    pub fn fade_in(duration_secs: f64) -> Self {
        Self::fade_alpha_to(1.0, duration_secs)
    }

    pub fn fade_out(duration_secs: f64) -> Self {
        Self::fade_alpha_to(0.0, duration_secs)
    }

    /// Linear fade toward `alpha`.
    pub fn fade_alpha_to(alpha: f64, duration_secs: f64) -> Self {
        Self::FadeAlphaTo {
            alpha: alpha.clamp(0.0, 1.0),
            duration_secs,
            ease: Ease::Linear,
        }
    }

    pub fn wait(duration_secs: f64) -> Self {
        Self::Wait { duration_secs }
    }

    pub fn run(f: impl Fn() + 'static) -> Self {
        Self::Run(Rc::new(f))
    }

    pub fn sequence(actions: impl IntoIterator<Item = Action>) -> Self {
        Self::Sequence(actions.into_iter().collect())
    }

    /// Replace the timing curve of a fade; other actions are returned unchanged.
    pub fn with_ease(self, ease: Ease) -> Self {
        match self {
            Self::FadeAlphaTo {
                alpha,
                duration_secs,
                ease: _,
            } => Self::FadeAlphaTo {
                alpha,
                duration_secs,
                ease,
            },
            other => other,
        }
    }

    /// Total running time in seconds.
    pub fn duration_secs(&self) -> f64 {
        match self {
            Self::FadeAlphaTo { duration_secs, .. } | Self::Wait { duration_secs } => {
                duration_secs.max(0.0)
            }
            Self::Run(_) => 0.0,
            Self::Sequence(actions) => actions.iter().map(Action::duration_secs).sum(),
        }
    }

    fn flatten_into(self, out: &mut VecDeque<Step>) {
        match self {
            Self::FadeAlphaTo {
                alpha,
                duration_secs,
                ease,
            } => out.push_back(Step::Fade {
                to: alpha,
                duration_secs: duration_secs.max(0.0),
                ease,
            }),
            Self::Wait { duration_secs } => out.push_back(Step::Wait {
                duration_secs: duration_secs.max(0.0),
            }),
            Self::Run(cb) => out.push_back(Step::Run(cb)),
            Self::Sequence(actions) => {
                for action in actions {
                    action.flatten_into(out);
                }
            }
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FadeAlphaTo {
                alpha,
                duration_secs,
                ease,
            } => f
                .debug_struct("FadeAlphaTo")
                .field("alpha", alpha)
                .field("duration_secs", duration_secs)
                .field("ease", ease)
                .finish(),
            Self::Wait { duration_secs } => f
                .debug_struct("Wait")
                .field("duration_secs", duration_secs)
                .finish(),
            Self::Run(_) => f.write_str("Run(..)"),
            Self::Sequence(actions) => f.debug_tuple("Sequence").field(actions).finish(),
        }
    }
}

#[derive(Clone)]
enum Step {
    Fade {
        to: f64,
        duration_secs: f64,
        ease: Ease,
    },
    Wait {
        duration_secs: f64,
    },
    Run(ActionCallback),
}

/// One action in flight, flattened into primitive steps.
struct RunningAction {
    key: Option<String>,
    steps: VecDeque<Step>,
    // Progress of `steps.front()`.
    elapsed: f64,
    from_alpha: Option<f64>,
}

impl RunningAction {
    fn new(action: Action, key: Option<String>) -> Self {
        let mut steps = VecDeque::new();
        action.flatten_into(&mut steps);
        Self {
            key,
            steps,
            elapsed: 0.0,
            from_alpha: None,
        }
    }

    fn finish_step(&mut self) {
        self.steps.pop_front();
        self.elapsed = 0.0;
        self.from_alpha = None;
    }

    /// Spend `dt` seconds. Returns `true` once every step has completed.
    fn advance(&mut self, dt: f64, alpha: &mut f64, fired: &mut Vec<ActionCallback>) -> bool {
        let mut budget = dt.max(0.0);
        loop {
            let Some(step) = self.steps.front().cloned() else {
                return true;
            };
            match step {
                Step::Run(cb) => {
                    fired.push(cb);
                    self.finish_step();
                }
                Step::Wait { duration_secs } => {
                    let need = (duration_secs - self.elapsed).max(0.0);
                    if budget < need {
                        self.elapsed += budget;
                        return false;
                    }
                    budget -= need;
                    self.finish_step();
                }
                Step::Fade {
                    to,
                    duration_secs,
                    ease,
                } => {
                    let from = *self.from_alpha.get_or_insert(*alpha);
                    let need = (duration_secs - self.elapsed).max(0.0);
                    if budget < need {
                        self.elapsed += budget;
                        let t = self.elapsed / duration_secs;
                        *alpha = from + (to - from) * ease.apply(t);
                        return false;
                    }
                    budget -= need;
                    *alpha = to;
                    self.finish_step();
                }
            }
        }
    }
}

/// Per-node set of running actions, at most one per key.
#[derive(Default)]
pub(crate) struct ActionRunner {
    running: Vec<RunningAction>,
}

impl ActionRunner {
    /// Start `action`; a keyed action replaces any action running under the same key.
    pub(crate) fn run(&mut self, action: Action, key: Option<&str>) {
        if let Some(key) = key {
            self.remove(key);
        }
        self.running
            .push(RunningAction::new(action, key.map(str::to_owned)));
    }

    pub(crate) fn remove(&mut self, key: &str) -> bool {
        let before = self.running.len();
        self.running.retain(|a| a.key.as_deref() != Some(key));
        self.running.len() != before
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.running.iter().any(|a| a.key.as_deref() == Some(key))
    }

    pub(crate) fn len(&self) -> usize {
        self.running.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.running.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.running.clear();
    }

    /// Advance every action by `dt`, dropping finished ones.
    ///
    /// Callbacks are returned rather than invoked so the caller can release
    /// any borrows on the owning node first.
    pub(crate) fn advance(&mut self, dt: f64, alpha: &mut f64) -> Vec<ActionCallback> {
        let mut fired = Vec::new();
        self.running
            .retain_mut(|action| !action.advance(dt, alpha, &mut fired));
        fired
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/action.rs"]
mod tests;
