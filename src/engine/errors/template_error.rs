/// why an authored object template was rejected at load time
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemplateError {
    NonFiniteTime,
    EndBeforeStart,
    /// slider path has fewer than two points
    DegeneratePath,
    /// slider or spinner with no duration to interact with
    ZeroDuration,
    /// the map contained no usable templates at all
    EmptyMap,
}
