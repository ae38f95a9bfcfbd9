/// Callback invoked after a successful parameter update, signalling the host
/// that any cached energies or forces derived from this engine are stale.
pub type InvalidationCallback<'a> = Box<dyn Fn() + Send + Sync + 'a>;

/// Observer hook for the host simulation context.
///
/// A default-constructed notifier does nothing, which suits hosts that
/// re-evaluate unconditionally. Hosts with dependent caches register a
/// callback and invalidate them when it fires.
#[derive(Default)]
pub struct ParameterChangeNotifier<'a> {
    callback: Option<InvalidationCallback<'a>>,
}

impl<'a> ParameterChangeNotifier<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: InvalidationCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn notify_changed(&self) {
        if let Some(cb) = &self.callback {
            cb();
        }
    }
}
