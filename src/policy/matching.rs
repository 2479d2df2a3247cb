//! Group to package matching for publish control
//!
//! A group authorizes a package when the names are identical, or when the
//! package is scoped (`@a/b/c`) and the group's path segments are a prefix of
//! the scope path. `org/team` may publish `@org/team/pkg` but `org/team/sub`
//! may not publish `@org/team`. Groups may be written with or without the
//! scope marker, so `@org/team` behaves like `org/team`.

/// Marker that starts a scoped package name
pub const SCOPE_MARKER: char = '@';

/// Whether `group` grants publish rights on `package_name`
pub fn match_group_with_package(group: &str, package_name: &str) -> bool {
    if group == package_name {
        return true;
    }

    let Some(scope_path) = package_name.strip_prefix(SCOPE_MARKER) else {
        return false;
    };

    let group_path = group.strip_prefix(SCOPE_MARKER).unwrap_or(group);
    let group_segments: Vec<&str> = group_path.split('/').collect();
    let package_segments: Vec<&str> = scope_path.split('/').collect();

    if group_segments.len() > package_segments.len() {
        return false;
    }

    group_segments
        .iter()
        .zip(&package_segments)
        .all(|(g, p)| g == p)
}
