use lazy_static::lazy_static;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

/// Theme shared by every screen; subscribers see each change.
#[derive(Debug)]
pub struct ThemeStore {
    tx: watch::Sender<Theme>,
}

lazy_static! {
    static ref GLOBAL_THEME: ThemeStore = ThemeStore::new(Theme::default());
}

impl ThemeStore {
    pub fn new(initial: Theme) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// The process-wide store.
    pub fn global() -> &'static ThemeStore {
        &GLOBAL_THEME
    }

    pub fn current(&self) -> Theme {
        *self.tx.borrow()
    }

    pub fn set(&self, theme: Theme) {
        self.tx.send_if_modified(|current| {
            let changed = *current != theme;
            *current = theme;
            changed
        });
    }

    pub fn toggle(&self) -> Theme {
        self.tx.send_modify(|current| *current = current.toggled());
        self.current()
    }

    pub fn subscribe(&self) -> watch::Receiver<Theme> {
        self.tx.subscribe()
    }
}

impl Default for ThemeStore {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}
