//! Short-circuiting composition of fallible steps.
//!
//! `chain` is a single bind: it may change the payload type. `pipeline` folds
//! `chain` over a list of steps that all consume and produce the same type.
//! Neither wraps nor annotates the error it passes through.

/// A boxed homogeneous step, for lists of closures with distinct types.
pub type Step<'a, T, E> = Box<dyn FnOnce(T) -> Result<T, E> + 'a>;

/// Runs `step` on the payload of a successful `result`; returns a failed
/// `result` untouched without invoking `step`.
pub fn chain<T, U, E, F>(result: Result<T, E>, step: F) -> Result<U, E>
where
    F: FnOnce(T) -> Result<U, E>,
{
    match result {
        Ok(data) => step(data),
        Err(error) => Err(error),
    }
}

/// Runs `steps` in order, stopping at the first failure. An empty step list
/// returns `initial` unchanged.
pub fn pipeline<T, E, I, F>(initial: Result<T, E>, steps: I) -> Result<T, E>
where
    I: IntoIterator<Item = F>,
    F: FnOnce(T) -> Result<T, E>,
{
    let mut current = initial;
    for step in steps {
        current = match current {
            Ok(data) => step(data),
            Err(error) => return Err(error),
        };
    }
    current
}

/// Named steps with `pipeline` semantics, traced as they run.
pub struct StepPipeline<'a, T, E> {
    steps: Vec<(String, Step<'a, T, E>)>,
}

impl<'a, T, E> Default for StepPipeline<'a, T, E> {
    fn default() -> Self {
        Self { steps: Vec::new() }
    }
}

impl<'a, T, E: std::fmt::Display> StepPipeline<'a, T, E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step<F>(mut self, name: impl Into<String>, step: F) -> Self
    where
        F: FnOnce(T) -> Result<T, E> + 'a,
    {
        self.steps.push((name.into(), Box::new(step)));
        self
    }

    pub fn push(&mut self, name: impl Into<String>, step: Step<'a, T, E>) {
        self.steps.push((name.into(), step));
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|(name, _)| name.as_str())
    }

    pub fn run(self, initial: Result<T, E>) -> Result<T, E> {
        let total = self.steps.len();
        let steps = self
            .steps
            .into_iter()
            .enumerate()
            .map(|(position, (name, step))| {
                move |data: T| {
                    tracing::debug!("Running step {}/{}: {}", position + 1, total, name);
                    let result = step(data);
                    if let Err(e) = &result {
                        tracing::warn!("Step '{}' failed, skipping remaining steps: {}", name, e);
                    }
                    result
                }
            });
        pipeline(initial, steps)
    }
}
