use std::{path::PathBuf, rc::Rc, sync::{atomic::{AtomicUsize, Ordering}, Arc, RwLock}};

use termcolor::Buffer;

use super::diagnostic::{Diagnostic, Label, Level, Location};
use super::src_span::SrcSpan;

pub trait WarningEmitterIO {
    fn emit_warning(&self, warning: Warning);
}

#[derive(Debug, Clone, Copy)]
pub struct NullWarningEmitterIO;

impl WarningEmitterIO for NullWarningEmitterIO {
    fn emit_warning(&self, _warning: Warning) {}
}

#[derive(Debug, Default, Clone)]
pub struct VectorWarningEmitterIO {
    pub warnings: Arc<RwLock<Vec<Warning>>>
}

impl VectorWarningEmitterIO {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<Warning> {
        let mut warnings = self.write_lock();
        std::mem::take(&mut *warnings)
    }

    pub fn reset(&self) {
        let mut warnings = self.write_lock();
        warnings.clear();
    }

    pub fn pop(&self) -> Option<Warning> {
        let mut warnings = self.write_lock();
        warnings.pop()
    }

    fn write_lock(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Warning>> {
        self.warnings.write().expect("Vector lock poisoned")
    }
}

impl WarningEmitterIO for VectorWarningEmitterIO {
    fn emit_warning(&self, warning: Warning) {
        let mut warnings = self.write_lock();

        warnings.push(warning);
    }
}

pub struct WarningEmitter {
    count: Arc<AtomicUsize>,
    emitter: Rc<dyn WarningEmitterIO>
}

impl WarningEmitter {
    pub fn new(emitter: Rc<dyn WarningEmitterIO>) -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
            emitter,
        }
    }

    pub fn null() -> Self {
        Self::new(Rc::new(NullWarningEmitterIO))
    }

    pub fn reset_count(&self) {
        self.count.store(0, Ordering::Relaxed);
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }

    pub fn emit(&self, warning: Warning) {
        _ = self.count.fetch_add(1, Ordering::Relaxed);
        self.emitter.emit_warning(warning);
    }
}

/// Attaches the source being run to every warning so it can be rendered
/// against the offending text later.
pub struct SourceWarningEmitter {
    path: PathBuf,
    src: String,
    emitter: WarningEmitter,
}

impl SourceWarningEmitter {
    pub fn new(
        path: PathBuf,
        src: String,
        emitter: WarningEmitter
    ) -> Self {
        Self {
            path,
            src,
            emitter,
        }
    }

    pub fn null() -> Self {
        Self {
            path: PathBuf::new(),
            src: String::new(),
            emitter: WarningEmitter::null(),
        }
    }

    pub fn count(&self) -> usize {
        self.emitter.count()
    }

    pub fn emit(&self, warning: SourceWarning) {
        self.emitter.emit(Warning::Source {
            path: self.path.clone(),
            src: self.src.clone(),
            warning,
        });
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SourceWarning {
    /// An assignment inside a block found no enclosing binding and created a
    /// new one in the block's own frame; it disappears when the call returns.
    ImplicitDeclaration {
        name: String,
        location: SrcSpan,
    },
    /// The program grammar stopped matching before the end of the source.
    UnparsedInput {
        location: SrcSpan,
    },
}

impl SourceWarning {
    pub fn location(&self) -> SrcSpan {
        match self {
            SourceWarning::ImplicitDeclaration { location, .. }
            | SourceWarning::UnparsedInput { location } => *location,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    Source {
        path: PathBuf,
        src: String,
        warning: SourceWarning
    }
}

impl Warning {
    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();
        self.pretty(&mut nocolor);
        String::from_utf8(nocolor.into_inner()).expect("Error printing produced invalid utf8")
    }

    pub fn pretty(&self, buf: &mut Buffer) {
        use std::io::Write;

        self.to_diagnostic().write(buf);
        buf.write_all(b"\n")
            .expect("error pretty buffer write space after");
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Warning::Source { path, src, warning } => {
                let (title, label, hint) = match warning {
                    SourceWarning::ImplicitDeclaration { name, .. } => (
                        "Implicit declaration",
                        format!("`{name}` is not bound in any enclosing scope"),
                        Some(format!("declare it with `| {name} |` if it is meant to be local")),
                    ),
                    SourceWarning::UnparsedInput { .. } => (
                        "Unparsed input",
                        "This part of the source is ignored".to_string(),
                        None,
                    ),
                };

                Diagnostic {
                    title: title.into(),
                    text: "".into(),
                    hint,
                    level: Level::Warning,
                    location: Some(Location {
                        src,
                        path: path.to_path_buf(),
                        label: Label {
                            text: Some(label),
                            span: warning.location(),
                        },
                        extra_labels: vec![]
                    }),
                }
            }
        }
    }
}
