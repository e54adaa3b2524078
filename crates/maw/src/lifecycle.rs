type Hook<C> = Box<dyn FnMut(&mut C)>;

/// Init and per-tick hooks of a game, driven once per frame by the main loop.
///
/// The init hook runs exactly once, right before the first tick, unless it was
/// already run explicitly through [`Lifecycle::init`].
pub struct Lifecycle<C> {
    init: Option<Hook<C>>,
    tick: Option<Hook<C>>,
    did_init: bool,
}

impl<C> Default for Lifecycle<C> {
    fn default() -> Self {
        Self {
            init: None,
            tick: None,
            did_init: false,
        }
    }
}

impl<C> Lifecycle<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_init(mut self, hook: impl FnMut(&mut C) + 'static) -> Self {
        self.init = Some(Box::new(hook));
        self
    }

    pub fn on_tick(mut self, hook: impl FnMut(&mut C) + 'static) -> Self {
        self.tick = Some(Box::new(hook));
        self
    }

    pub fn did_init(&self) -> bool {
        self.did_init
    }

    pub fn init(&mut self, context: &mut C) {
        self.did_init = true;
        if let Some(init) = self.init.as_mut() {
            init(context);
        }
    }

    pub fn tick(&mut self, context: &mut C) {
        if !self.did_init {
            self.init(context);
        }
        if let Some(tick) = self.tick.as_mut() {
            tick(context);
        }
    }
}
