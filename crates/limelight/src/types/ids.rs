/*! Branded ID types for type-safe window references. */

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

/// Window identifier, assigned by the window server.
///
/// Opaque and unique while the window is on screen; not stable across a
/// close/reopen of the same document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into)]
pub struct WindowId(pub u32);

/// Process ID - branded type to distinguish from other u32 values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into)]
pub struct ProcessId(pub u32);
