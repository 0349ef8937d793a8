//! Minimal multi-buffer / multi-view editor model.
//!
//! Hosts that do not have an editor of their own (tests, the CLI's library users, scripted
//! sessions) can use [`Workspace`] as the [`Editor`] behind a [`crate::ToggleCommand`]. It
//! tracks:
//!
//! - `BufferId` + optional file path (at most one buffer per path)
//! - `ViewId` + the buffer it shows
//! - the active view
//!
//! File contents are not loaded; toggling only needs to know which path each view shows.

use crate::error::BoxError;
use crate::host::Editor;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Opaque identifier for an open buffer in a [`Workspace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BufferId(u64);

impl BufferId {
    /// Get the underlying numeric id.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Opaque identifier for a view into a buffer in a [`Workspace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewId(u64);

impl ViewId {
    /// Get the underlying numeric id.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Result of opening a buffer (a buffer always starts with a default view).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenBufferResult {
    /// The created buffer id.
    pub buffer_id: BufferId,
    /// The initial view id into that buffer.
    pub view_id: ViewId,
}

/// Workspace-level errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkspaceError {
    #[error("'{}' is already open", .0.display())]
    /// A buffer with this path already exists.
    PathAlreadyOpen(PathBuf),
    #[error("buffer {0:?} not found")]
    /// A buffer id was not found.
    BufferNotFound(BufferId),
    #[error("view {0:?} not found")]
    /// A view id was not found.
    ViewNotFound(ViewId),
}

struct BufferEntry {
    path: Option<PathBuf>,
}

struct ViewEntry {
    buffer: BufferId,
}

/// Open buffers, their views, and the active view.
pub struct Workspace {
    buffers: BTreeMap<BufferId, BufferEntry>,
    views: BTreeMap<ViewId, ViewEntry>,
    path_to_buffer: HashMap<PathBuf, BufferId>,
    next_buffer_id: u64,
    next_view_id: u64,
    active_view: Option<ViewId>,
}

impl Default for Workspace {
    fn default() -> Self {
        Self {
            buffers: BTreeMap::new(),
            views: BTreeMap::new(),
            path_to_buffer: HashMap::new(),
            next_buffer_id: 1,
            next_view_id: 1,
            active_view: None,
        }
    }
}

impl std::fmt::Debug for Workspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workspace")
            .field("buffer_count", &self.buffers.len())
            .field("view_count", &self.views.len())
            .field("active_view", &self.active_view)
            .finish()
    }
}

impl Workspace {
    /// Create an empty workspace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of open buffers.
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    /// Returns `true` if there are no open buffers.
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Returns the number of open views.
    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    /// Return the active view id (if any).
    pub fn active_view_id(&self) -> Option<ViewId> {
        self.active_view
    }

    /// Return the active buffer id (if any).
    pub fn active_buffer_id(&self) -> Option<BufferId> {
        let view_id = self.active_view?;
        self.views.get(&view_id).map(|v| v.buffer)
    }

    /// Set the active view.
    pub fn set_active_view(&mut self, id: ViewId) -> Result<(), WorkspaceError> {
        if !self.views.contains_key(&id) {
            return Err(WorkspaceError::ViewNotFound(id));
        }
        self.active_view = Some(id);
        Ok(())
    }

    /// Open a new buffer, creating an initial view.
    ///
    /// `None` opens a scratch buffer with no file behind it. The first view ever opened becomes
    /// active; later ones do not.
    pub fn open_buffer(&mut self, path: Option<PathBuf>) -> Result<OpenBufferResult, WorkspaceError> {
        if let Some(path) = path.as_ref()
            && self.path_to_buffer.contains_key(path)
        {
            return Err(WorkspaceError::PathAlreadyOpen(path.clone()));
        }

        let buffer_id = BufferId(self.next_buffer_id);
        self.next_buffer_id = self.next_buffer_id.saturating_add(1);

        if let Some(path) = path.as_ref() {
            self.path_to_buffer.insert(path.clone(), buffer_id);
        }
        self.buffers.insert(buffer_id, BufferEntry { path });

        let view_id = self.create_view(buffer_id)?;
        if self.active_view.is_none() {
            self.active_view = Some(view_id);
        }

        Ok(OpenBufferResult { buffer_id, view_id })
    }

    /// Create another view into an existing buffer.
    pub fn create_view(&mut self, buffer: BufferId) -> Result<ViewId, WorkspaceError> {
        if !self.buffers.contains_key(&buffer) {
            return Err(WorkspaceError::BufferNotFound(buffer));
        }
        let view_id = ViewId(self.next_view_id);
        self.next_view_id = self.next_view_id.saturating_add(1);
        self.views.insert(view_id, ViewEntry { buffer });
        Ok(view_id)
    }

    /// Close a buffer (and all its views).
    pub fn close_buffer(&mut self, id: BufferId) -> Result<(), WorkspaceError> {
        let Some(entry) = self.buffers.remove(&id) else {
            return Err(WorkspaceError::BufferNotFound(id));
        };

        if let Some(path) = entry.path.as_ref() {
            self.path_to_buffer.remove(path);
        }
        self.views.retain(|_, v| v.buffer != id);

        if self
            .active_view
            .is_some_and(|active| !self.views.contains_key(&active))
        {
            self.active_view = self.views.keys().next().copied();
        }
        Ok(())
    }

    /// Close a view. If it was the last view of its buffer, the buffer is also closed.
    pub fn close_view(&mut self, id: ViewId) -> Result<(), WorkspaceError> {
        let Some(view) = self.views.remove(&id) else {
            return Err(WorkspaceError::ViewNotFound(id));
        };

        if self.active_view == Some(id) {
            self.active_view = self.views.keys().next().copied();
        }

        if !self.views.values().any(|v| v.buffer == view.buffer) {
            self.close_buffer(view.buffer)?;
        }
        Ok(())
    }

    /// Look up the buffer showing `path`.
    pub fn buffer_id_for_path(&self, path: &Path) -> Option<BufferId> {
        self.path_to_buffer.get(path).copied()
    }

    /// File path of a buffer (`None` for scratch buffers or unknown ids).
    pub fn buffer_path(&self, id: BufferId) -> Option<&Path> {
        self.buffers.get(&id)?.path.as_deref()
    }

    /// The buffer shown by a view.
    pub fn buffer_id_for_view(&self, id: ViewId) -> Result<BufferId, WorkspaceError> {
        self.views
            .get(&id)
            .map(|v| v.buffer)
            .ok_or(WorkspaceError::ViewNotFound(id))
    }

    /// File path behind the active view.
    pub fn active_path(&self) -> Option<&Path> {
        self.buffer_path(self.active_buffer_id()?)
    }

    /// Make `path` the active view, opening a buffer for it if needed.
    ///
    /// If the path is already open, its lowest-numbered view is activated and no buffer is
    /// created.
    pub fn activate_path(&mut self, path: &Path) -> Result<ViewId, WorkspaceError> {
        let view_id = match self.buffer_id_for_path(path) {
            Some(buffer) => self
                .views
                .iter()
                .find_map(|(vid, v)| (v.buffer == buffer).then_some(*vid))
                .ok_or(WorkspaceError::BufferNotFound(buffer))?,
            None => self.open_buffer(Some(path.to_path_buf()))?.view_id,
        };
        self.active_view = Some(view_id);
        Ok(view_id)
    }
}

impl Editor for Workspace {
    fn current_file_path(&self) -> Option<PathBuf> {
        self.active_path().map(Path::to_path_buf)
    }

    fn open_path(&mut self, path: &Path) -> Result<(), BoxError> {
        self.activate_path(path)?;
        Ok(())
    }
}
