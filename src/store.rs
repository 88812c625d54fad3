use std::fmt;
use std::sync::Arc;

use log::{debug, warn};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("contact name must not be empty")]
    EmptyName,
    #[error("contact index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("contact list changed while the edit session was open")]
    StaleSession,
    #[error("contact list changed since the delete was requested")]
    StaleRequest,
    #[error("no edit session is open")]
    NoSession,
}

impl StoreError {
    /// Errors that only a caller holding a bad index can produce.
    pub fn is_index_fault(&self) -> bool {
        matches!(
            self,
            StoreError::IndexOutOfRange { .. } | StoreError::StaleSession | StoreError::StaleRequest
        )
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

// =============================================================================
// Records
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Personal,
    Work,
    Family,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Personal, Category::Work, Category::Family];

    pub fn title(self) -> &'static str {
        match self {
            Category::Personal => "Personal",
            Category::Work => "Work",
            Category::Family => "Family",
        }
    }

    /// Cycle order used by the form: unset, Personal, Work, Family, unset.
    pub fn cycle_next(current: Option<Category>) -> Option<Category> {
        match current {
            None => Some(Category::Personal),
            Some(Category::Personal) => Some(Category::Work),
            Some(Category::Work) => Some(Category::Family),
            Some(Category::Family) => None,
        }
    }

    pub fn cycle_prev(current: Option<Category>) -> Option<Category> {
        match current {
            None => Some(Category::Family),
            Some(Category::Family) => Some(Category::Work),
            Some(Category::Work) => Some(Category::Personal),
            Some(Category::Personal) => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub name: String,
    pub number: String,
    pub category: Option<Category>,
}

impl Contact {
    pub fn new(name: impl Into<String>, number: impl Into<String>, category: Option<Category>) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
            category,
        }
    }
}

// =============================================================================
// Snapshots
// =============================================================================

/// Immutable view of the contact list at one version.
///
/// Every mutation swaps in a freshly built list, so a snapshot held by the
/// presentation layer never changes underneath it. Two snapshots with the
/// same version share the same allocation.
#[derive(Debug, Clone)]
pub struct Snapshot {
    version: u64,
    contacts: Arc<[Contact]>,
}

impl Snapshot {
    fn empty() -> Self {
        Self {
            version: 0,
            contacts: Arc::from(Vec::new()),
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn get(&self, index: usize) -> Option<&Contact> {
        self.contacts.get(index)
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// True when both snapshots point at the same list allocation.
    pub fn same_list(&self, other: &Snapshot) -> bool {
        Arc::ptr_eq(&self.contacts, &other.contacts)
    }
}

// =============================================================================
// Edit session
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub name: String,
    pub number: String,
    pub category: Option<Category>,
}

impl Draft {
    fn from_contact(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            number: contact.number.clone(),
            category: contact.category,
        }
    }

    fn to_contact(&self) -> StoreResult<Contact> {
        if self.name.is_empty() {
            return Err(StoreError::EmptyName);
        }
        Ok(Contact {
            name: self.name.clone(),
            number: self.number.clone(),
            category: self.category,
        })
    }
}

/// A single draft field update coming from the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftField {
    Name(String),
    Number(String),
    Category(Option<Category>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditSession {
    #[default]
    Idle,
    Creating {
        draft: Draft,
    },
    Editing {
        index: usize,
        /// Record as it was when the session opened.
        original: Contact,
        draft: Draft,
        /// List version the index was taken against.
        base_version: u64,
    },
}

impl EditSession {
    pub fn is_open(&self) -> bool {
        !matches!(self, EditSession::Idle)
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, EditSession::Editing { .. })
    }

    pub fn draft(&self) -> Option<&Draft> {
        match self {
            EditSession::Idle => None,
            EditSession::Creating { draft } | EditSession::Editing { draft, .. } => Some(draft),
        }
    }

    fn draft_mut(&mut self) -> Option<&mut Draft> {
        match self {
            EditSession::Idle => None,
            EditSession::Creating { draft } | EditSession::Editing { draft, .. } => Some(draft),
        }
    }

    pub fn editing_index(&self) -> Option<usize> {
        match self {
            EditSession::Editing { index, .. } => Some(*index),
            _ => None,
        }
    }

    pub fn original(&self) -> Option<&Contact> {
        match self {
            EditSession::Editing { original, .. } => Some(original),
            _ => None,
        }
    }
}

// =============================================================================
// Deletion protocol and notifications
// =============================================================================

/// Pending deletion awaiting approval. Dropping it rejects the delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    index: usize,
    version: u64,
    contact: Contact,
}

impl DeleteRequest {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn contact(&self) -> &Contact {
        &self.contact
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Added { index: usize },
    Updated { index: usize },
    Removed { index: usize, contact: Contact },
}

#[derive(Debug, Clone)]
pub struct StoreEvent {
    pub change: Change,
    pub snapshot: Snapshot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&StoreEvent)>;

// =============================================================================
// Store
// =============================================================================

pub struct ContactStore {
    list: Snapshot,
    session: EditSession,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl Default for ContactStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ContactStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContactStore")
            .field("list", &self.list)
            .field("session", &self.session)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ContactStore {
    pub fn new() -> Self {
        Self {
            list: Snapshot::empty(),
            session: EditSession::Idle,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn contacts(&self) -> Snapshot {
        self.list.clone()
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Register a callback that runs after every completed list mutation.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&StoreEvent) + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn begin_create(&mut self) {
        self.session = EditSession::Creating {
            draft: Draft::default(),
        };
        debug!("event=session_open mode=create");
    }

    pub fn begin_edit(&mut self, index: usize) -> StoreResult<()> {
        let contact = self.checked(index)?.clone();
        self.session = EditSession::Editing {
            index,
            draft: Draft::from_contact(&contact),
            original: contact,
            base_version: self.list.version(),
        };
        debug!("event=session_open mode=edit index={}", index);
        Ok(())
    }

    pub fn update_draft_field(&mut self, field: DraftField) -> StoreResult<()> {
        let draft = self.session.draft_mut().ok_or(StoreError::NoSession)?;
        match field {
            DraftField::Name(value) => draft.name = value,
            DraftField::Number(value) => draft.number = value,
            DraftField::Category(value) => draft.category = value,
        }
        Ok(())
    }

    /// Write the draft into the list and close the session.
    ///
    /// A draft without a name leaves both the list and the session untouched.
    /// An edit whose list changed since `begin_edit` is rejected and the
    /// session stays open so the caller can cancel it.
    pub fn commit(&mut self) -> StoreResult<usize> {
        let (index, contact, next) = match &self.session {
            EditSession::Idle => return Err(StoreError::NoSession),
            EditSession::Creating { draft } => {
                let contact = self.validated(draft)?;
                let mut next = self.list.contacts().to_vec();
                next.push(contact.clone());
                (next.len() - 1, contact, next)
            }
            EditSession::Editing {
                index,
                draft,
                base_version,
                ..
            } => {
                let contact = self.validated(draft)?;
                if *base_version != self.list.version() {
                    warn!(
                        "event=commit_rejected reason=stale_session index={} base_version={} version={}",
                        index,
                        base_version,
                        self.list.version()
                    );
                    return Err(StoreError::StaleSession);
                }
                self.checked(*index)?;
                let mut next = self.list.contacts().to_vec();
                next[*index] = contact.clone();
                (*index, contact, next)
            }
        };

        let change = if self.session.is_editing() {
            Change::Updated { index }
        } else {
            Change::Added { index }
        };
        self.session = EditSession::Idle;
        self.replace_list(next);
        debug!(
            "event=commit index={} name_len={} category={:?}",
            index,
            contact.name.chars().count(),
            contact.category
        );
        self.notify(change);
        Ok(index)
    }

    pub fn cancel(&mut self) {
        if self.session.is_open() {
            debug!("event=session_cancel editing={}", self.session.is_editing());
        }
        self.session = EditSession::Idle;
    }

    pub fn request_delete(&self, index: usize) -> StoreResult<DeleteRequest> {
        let contact = self.checked(index)?.clone();
        Ok(DeleteRequest {
            index,
            version: self.list.version(),
            contact,
        })
    }

    pub fn confirm_delete(&mut self, request: &DeleteRequest) -> StoreResult<Contact> {
        self.checked(request.index)?;
        if request.version != self.list.version() {
            warn!(
                "event=delete_rejected reason=stale_request index={} request_version={} version={}",
                request.index,
                request.version,
                self.list.version()
            );
            return Err(StoreError::StaleRequest);
        }

        let mut next = self.list.contacts().to_vec();
        let removed = next.remove(request.index);
        self.replace_list(next);
        debug!("event=delete index={} len={}", request.index, self.list.len());
        self.notify(Change::Removed {
            index: request.index,
            contact: removed.clone(),
        });
        Ok(removed)
    }

    fn checked(&self, index: usize) -> StoreResult<&Contact> {
        self.list.get(index).ok_or(StoreError::IndexOutOfRange {
            index,
            len: self.list.len(),
        })
    }

    fn validated(&self, draft: &Draft) -> StoreResult<Contact> {
        draft.to_contact().map_err(|err| {
            warn!("event=commit_rejected reason=empty_name");
            err
        })
    }

    fn replace_list(&mut self, next: Vec<Contact>) {
        self.list = Snapshot {
            version: self.list.version() + 1,
            contacts: Arc::from(next),
        };
    }

    fn notify(&mut self, change: Change) {
        let event = StoreEvent {
            change,
            snapshot: self.list.clone(),
        };
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }
}
