//! Relations between entities.
//!
//! Every relation is persisted as an integer id where `-1` means "unset".
//! In memory a relation starts out as that id and is only replaced by the
//! related entity when a resolution step explicitly fetches it.

/// Row identifier as stored in the database.
pub type Id = i64;

/// Sentinel stored in foreign-key columns for "no link", and carried by
/// entities that have not been persisted yet.
pub const UNSET_ID: Id = -1;

/// Returns true for ids that can name a persisted row.
pub fn is_persisted_id(id: Id) -> bool {
    id >= 1
}

/// An entity with a database identity.
pub trait Identified {
    fn id(&self) -> Id;
    fn set_id(&mut self, id: Id);

    fn is_persisted(&self) -> bool {
        is_persisted_id(self.id())
    }
}

impl<T: Identified> Identified for Box<T> {
    fn id(&self) -> Id {
        (**self).id()
    }

    fn set_id(&mut self, id: Id) {
        (**self).set_id(id)
    }
}

/// A relation to another entity.
#[derive(Debug, Clone, PartialEq)]
pub enum Link<T> {
    /// No related entity.
    Unset,
    /// A related entity known only by its stored id.
    Id(Id),
    /// A related entity that has been fetched and attached.
    Resolved(T),
}

impl<T> Default for Link<T> {
    fn default() -> Self {
        Link::Unset
    }
}

impl<T> Link<T> {
    /// Build a link from a stored foreign-key value. The sentinel (and any
    /// other non-positive id) becomes `Unset`.
    pub fn from_id(id: Id) -> Self {
        if is_persisted_id(id) {
            Link::Id(id)
        } else {
            Link::Unset
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, Link::Unset)
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Link::Resolved(_))
    }

    /// The attached entity, if this link has been resolved.
    pub fn get(&self) -> Option<&T> {
        match self {
            Link::Resolved(value) => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        match self {
            Link::Resolved(value) => Some(value),
            _ => None,
        }
    }
}

impl<T: Identified> Link<T> {
    /// Id of the related entity, whether resolved or not.
    ///
    /// A resolved entity that was never persisted has no usable id.
    pub fn id(&self) -> Option<Id> {
        match self {
            Link::Unset => None,
            Link::Id(id) => Some(*id).filter(|id| is_persisted_id(*id)),
            Link::Resolved(value) => Some(value.id()).filter(|id| is_persisted_id(*id)),
        }
    }

    /// Value written to the foreign-key column.
    pub fn storage_id(&self) -> Id {
        self.id().unwrap_or(UNSET_ID)
    }
}

impl<T> From<T> for Link<T> {
    fn from(value: T) -> Self {
        Link::Resolved(value)
    }
}
