//! Platform-specific helpers.
//! This module hides OS differences (Unix/Windows) behind a uniform API so
//! the rest of the codebase can remain platform-agnostic.

#[cfg(unix)]
mod unix;
#[cfg(not(unix))]
mod windows;

#[cfg(unix)]
pub use unix::{
    chown, group_name, lookup_group, lookup_user, open_log_file_secure_append, remove_entry,
    set_mode, symlink, user_name,
};

#[cfg(not(unix))]
pub use windows::{
    chown, group_name, lookup_group, lookup_user, open_log_file_secure_append, remove_entry,
    set_mode, symlink, user_name,
};
