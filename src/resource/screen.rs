use serde_json::Value;
use tracing::debug;

use super::{FieldError, Record, Resource};

/// A write the screen has committed to; executed by `ApiClient::apply`.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingWrite<R> {
    Create(R),
    Update { id: i64, form: R },
    Delete { id: i64 },
}

/// The single mode a CRUD screen is in.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ScreenState<R> {
    #[default]
    Idle,
    Editing {
        id: Option<i64>,
        form: R,
        errors: Vec<FieldError>,
    },
    ConfirmingDelete {
        id: i64,
    },
    Submitting(PendingWrite<R>),
}

impl<R> ScreenState<R> {
    pub fn name(&self) -> &'static str {
        match self {
            ScreenState::Idle => "idle",
            ScreenState::Editing { .. } => "editing",
            ScreenState::ConfirmingDelete { .. } => "confirming delete",
            ScreenState::Submitting(_) => "submitting",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScreenError {
    #[error("please fill in all required fields: {}", join(.0))]
    Validation(Vec<FieldError>),
    #[error("no item with id {0}")]
    NotFound(i64),
    #[error("unknown field '{0}'")]
    UnknownField(String),
    #[error("cannot {action} while {from}")]
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },
}

fn join(errors: &[FieldError]) -> String {
    errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; ")
}

/// List + modal form for one resource: load, edit, validate, write, refetch.
#[derive(Debug)]
pub struct Screen<R> {
    items: Vec<Record<R>>,
    state: ScreenState<R>,
}

impl<R: Resource> Default for Screen<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            state: ScreenState::Idle,
        }
    }
}

impl<R: Resource> Screen<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[Record<R>] {
        &self.items
    }

    pub fn state(&self) -> &ScreenState<R> {
        &self.state
    }

    pub fn find(&self, id: i64) -> Option<&Record<R>> {
        self.items.iter().find(|r| r.id == id)
    }

    /// Replace the list with a fresh fetch.
    pub fn load(&mut self, items: Vec<Record<R>>) {
        debug!("Loaded {} {} items", items.len(), R::LABEL);
        self.items = items;
    }

    pub fn open_create(&mut self) -> Result<(), ScreenError> {
        self.expect_idle("open the form")?;
        self.state = ScreenState::Editing {
            id: None,
            form: R::default(),
            errors: Vec::new(),
        };
        Ok(())
    }

    pub fn open_edit(&mut self, id: i64) -> Result<(), ScreenError> {
        self.expect_idle("edit")?;
        let form = self.find(id).ok_or(ScreenError::NotFound(id))?.fields.clone();
        self.state = ScreenState::Editing {
            id: Some(id),
            form,
            errors: Vec::new(),
        };
        Ok(())
    }

    /// Set one form field by its wire name.
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<(), ScreenError> {
        let from = self.state.name();
        let ScreenState::Editing { form, .. } = &mut self.state else {
            return Err(ScreenError::InvalidTransition {
                from,
                action: "edit a field",
            });
        };

        let mut json = serde_json::to_value(&*form).map_err(|_| ScreenError::UnknownField(name.to_string()))?;
        match json.as_object_mut().and_then(|obj| obj.get_mut(name)) {
            Some(slot) => *slot = Value::String(value.to_string()),
            None => return Err(ScreenError::UnknownField(name.to_string())),
        }
        let mut updated: R =
            serde_json::from_value(json).map_err(|_| ScreenError::UnknownField(name.to_string()))?;
        updated.keep_read_only(form);
        *form = updated;
        Ok(())
    }

    /// Validate the form; on success the screen is `Submitting` the returned write.
    pub fn request_save(&mut self) -> Result<PendingWrite<R>, ScreenError> {
        let from = self.state.name();
        let ScreenState::Editing { id, form, errors } = &mut self.state else {
            return Err(ScreenError::InvalidTransition { from, action: "save" });
        };

        let found = form.validate();
        if !found.is_empty() {
            *errors = found.clone();
            return Err(ScreenError::Validation(found));
        }

        let write = match id {
            Some(id) => PendingWrite::Update {
                id: *id,
                form: form.clone(),
            },
            None => PendingWrite::Create(form.clone()),
        };
        self.state = ScreenState::Submitting(write.clone());
        Ok(write)
    }

    pub fn request_delete(&mut self, id: i64) -> Result<(), ScreenError> {
        self.expect_idle("delete")?;
        if self.find(id).is_none() {
            return Err(ScreenError::NotFound(id));
        }
        self.state = ScreenState::ConfirmingDelete { id };
        Ok(())
    }

    pub fn confirm_delete(&mut self) -> Result<PendingWrite<R>, ScreenError> {
        let ScreenState::ConfirmingDelete { id } = self.state else {
            return Err(ScreenError::InvalidTransition {
                from: self.state.name(),
                action: "confirm delete",
            });
        };
        let write = PendingWrite::Delete { id };
        self.state = ScreenState::Submitting(write.clone());
        Ok(write)
    }

    /// Close the form or the delete prompt.
    pub fn cancel(&mut self) -> Result<(), ScreenError> {
        match self.state {
            ScreenState::Submitting(_) => Err(ScreenError::InvalidTransition {
                from: self.state.name(),
                action: "cancel",
            }),
            _ => {
                self.state = ScreenState::Idle;
                Ok(())
            }
        }
    }

    /// Settle the in-flight write. Failure reopens what produced it so the user can retry.
    pub fn finish(&mut self, success: bool) -> Result<(), ScreenError> {
        let write = match std::mem::take(&mut self.state) {
            ScreenState::Submitting(write) => write,
            other => {
                let from = other.name();
                self.state = other;
                return Err(ScreenError::InvalidTransition {
                    from,
                    action: "finish",
                });
            }
        };
        if success {
            return Ok(());
        }
        self.state = match write {
            PendingWrite::Create(form) => ScreenState::Editing {
                id: None,
                form,
                errors: Vec::new(),
            },
            PendingWrite::Update { id, form } => ScreenState::Editing {
                id: Some(id),
                form,
                errors: Vec::new(),
            },
            PendingWrite::Delete { id } => ScreenState::ConfirmingDelete { id },
        };
        Ok(())
    }

    fn expect_idle(&self, action: &'static str) -> Result<(), ScreenError> {
        match self.state {
            ScreenState::Idle => Ok(()),
            _ => Err(ScreenError::InvalidTransition {
                from: self.state.name(),
                action,
            }),
        }
    }
}

// ── Tests ──
