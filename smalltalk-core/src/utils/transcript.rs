use std::{rc::Rc, sync::{Arc, RwLock}};

/// Output sink for `printNl` and friends. The host decides where the text
/// ends up; nothing is written to stdout by the core.
pub trait TranscriptIO {
    fn show(&self, text: &str);
}

#[derive(Debug, Clone, Copy)]
pub struct NullTranscriptIO;

impl TranscriptIO for NullTranscriptIO {
    fn show(&self, _text: &str) {}
}

#[derive(Debug, Default, Clone)]
pub struct StringTranscriptIO {
    pub contents: Arc<RwLock<String>>
}

impl StringTranscriptIO {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        self.contents.read().expect("Transcript lock poisoned").clone()
    }

    pub fn take(&self) -> String {
        let mut contents = self.write_lock();
        std::mem::take(&mut *contents)
    }

    pub fn reset(&self) {
        self.write_lock().clear();
    }

    fn write_lock(&self) -> std::sync::RwLockWriteGuard<'_, String> {
        self.contents.write().expect("Transcript lock poisoned")
    }
}

impl TranscriptIO for StringTranscriptIO {
    fn show(&self, text: &str) {
        self.write_lock().push_str(text);
    }
}

pub struct Transcript {
    io: Rc<dyn TranscriptIO>,
}

impl Transcript {
    pub fn new(io: Rc<dyn TranscriptIO>) -> Self {
        Self { io }
    }

    pub fn null() -> Self {
        Self::new(Rc::new(NullTranscriptIO))
    }

    pub fn show(&self, text: &str) {
        self.io.show(text)
    }
}
