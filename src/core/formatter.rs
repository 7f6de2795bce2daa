//! Display formatting for filenav.
//!
//! Turns sizes, timestamps and stat results into the strings shown in the lists and in the
//! stat view. Also holds the exact-width sanitizer used by the renderer.

use crate::core::FileItem;

use chrono::{DateTime, Utc};
use unicode_width::UnicodeWidthChar;

use std::fs::Metadata;
use std::time::SystemTime;

/// Data size suffixes. IEC names, every step is a factor of 1024.
pub const SIZE_SUFFIXES: [&str; 9] = [
    "bytes", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB", "ZiB", "YiB",
];

// File type and permission bits of st_mode
pub const S_IFMT: u32 = 0o170000;
pub const S_IFSOCK: u32 = 0o140000;
pub const S_IFLNK: u32 = 0o120000;
pub const S_IFREG: u32 = 0o100000;
pub const S_IFBLK: u32 = 0o060000;
pub const S_IFDIR: u32 = 0o040000;
pub const S_IFCHR: u32 = 0o020000;
pub const S_IFIFO: u32 = 0o010000;
pub const S_ISUID: u32 = 0o4000;
pub const S_ISGID: u32 = 0o2000;
pub const S_ISVTX: u32 = 0o1000;
pub const S_IRUSR: u32 = 0o400;
pub const S_IWUSR: u32 = 0o200;
pub const S_IXUSR: u32 = 0o100;
pub const S_IRGRP: u32 = 0o040;
pub const S_IWGRP: u32 = 0o020;
pub const S_IXGRP: u32 = 0o010;
pub const S_IROTH: u32 = 0o004;
pub const S_IWOTH: u32 = 0o002;
pub const S_IXOTH: u32 = 0o001;

/// One label/value line of the stat view.
#[derive(Debug, Clone, PartialEq)]
pub struct StatRow {
    pub label: &'static str,
    pub value: String,
}

impl StatRow {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        StatRow {
            label,
            value: value.into(),
        }
    }

    fn error() -> Self {
        StatRow::new("Error", "Failed to stat file")
    }
}

/// Checks that every bit set in `flags` is also set in `num`.
#[inline]
pub fn has_flags(num: u32, flags: u32) -> bool {
    num & flags == flags
}

/// Shortens a byte count to the largest unit where the value stays below 1024.
///
/// Values below 1024 are printed as plain bytes. With `long` the exact byte count is
/// appended in parentheses.
pub fn format_size(size: u64, long: bool) -> String {
    if size < 1024 {
        return format!("{} bytes", size);
    }

    let mut scaled = size as f64;
    let mut unit = 0;
    while unit + 1 < SIZE_SUFFIXES.len() {
        scaled /= 1024.0;
        unit += 1;
        if scaled < 1024.0 {
            break;
        }
    }
    let suffix = SIZE_SUFFIXES[unit];

    if long {
        format!("{:02.2} {} ({} bytes)", scaled, suffix, size)
    } else {
        format!("{:02.2} {}", scaled, suffix)
    }
}

/// Formats a timestamp as a UTC date and time, e.g. `2024-01-31 13:37:00 UTC`.
pub fn format_utc(time: SystemTime) -> String {
    let dt: DateTime<Utc> = DateTime::from(time);
    dt.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Formats the mode bits in the familiar unix style, like `drwxr-xr-x`.
pub fn format_attributes(meta: &Metadata) -> String {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        let file_type = meta.file_type();
        let first = if file_type.is_dir() {
            'd'
        } else if file_type.is_symlink() {
            'l'
        } else {
            '-'
        };
        let mode = meta.permissions().mode();
        let mut chars = [first, '-', '-', '-', '-', '-', '-', '-', '-', '-'];
        let shifts = [6, 3, 0];
        for (i, &shift) in shifts.iter().enumerate() {
            let base = 1 + i * 3;
            if (mode >> (shift + 2)) & 1u32 != 0 {
                chars[base] = 'r';
            }
            if (mode >> (shift + 1)) & 1u32 != 0 {
                chars[base + 1] = 'w';
            }
            if (mode >> shift) & 1u32 != 0 {
                chars[base + 2] = 'x';
            }
        }
        chars.iter().collect()
    }
    #[cfg(not(unix))]
    {
        let first = if meta.is_dir() { 'd' } else { '-' };
        let write = if meta.permissions().readonly() { '-' } else { 'w' };
        [first, 'r', write].iter().collect()
    }
}

/// Raw st_mode of the metadata. Built from the permission and type flags on non-unix targets.
pub fn mode_of(meta: &Metadata) -> u32 {
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        meta.mode()
    }
    #[cfg(not(unix))]
    {
        let kind = if meta.is_dir() { S_IFDIR } else { S_IFREG };
        let perms = if meta.permissions().readonly() {
            0o444
        } else {
            0o666
        };
        kind | perms
    }
}

/// Rows for the "Stats" section of the stat view.
///
/// A single error row is returned when the item could not be stat'ed.
pub fn stat_rows(item: &FileItem) -> Vec<StatRow> {
    let Some(meta) = item.stat() else {
        return vec![StatRow::error()];
    };

    vec![
        StatRow::new("Size", format_size(meta.len(), true)),
        StatRow::new("Created", format_optional_time(created_time(meta))),
        StatRow::new("Opened", format_optional_time(meta.accessed().ok())),
        StatRow::new("Modified", format_optional_time(meta.modified().ok())),
        StatRow::new("Owner", owner_string(meta)),
        StatRow::new("Owner Group", group_string(meta)),
        StatRow::new("Flags", format!("{:#b}", mode_of(meta))),
        StatRow::new(
            "Permissions",
            format_attributes(item.link_stat().unwrap_or(meta)),
        ),
    ]
}

/// Rows for the "Flags" section of the stat view, one per file type test and mode bit.
pub fn flag_rows(item: &FileItem) -> Vec<StatRow> {
    let Some(meta) = item.stat() else {
        return vec![StatRow::error()];
    };
    let mode = mode_of(meta);
    let kind = mode & S_IFMT;

    let flags: [(&'static str, bool); 19] = [
        ("Is Socket", kind == S_IFSOCK),
        ("Is Symlink", kind == S_IFLNK || item.is_symlink()),
        ("Is File", kind == S_IFREG),
        ("Is Block Dev.", kind == S_IFBLK),
        ("Is Directory", kind == S_IFDIR),
        ("Is Char Dev.", kind == S_IFCHR),
        ("Is FIFO", kind == S_IFIFO),
        ("Set UID Bit", has_flags(mode, S_ISUID)),
        ("Set GID Bit", has_flags(mode, S_ISGID)),
        ("Sticky Bit", has_flags(mode, S_ISVTX)),
        ("Owner Read", has_flags(mode, S_IRUSR)),
        ("Owner Write", has_flags(mode, S_IWUSR)),
        ("Owner Exec", has_flags(mode, S_IXUSR)),
        ("Group Read", has_flags(mode, S_IRGRP)),
        ("Group Write", has_flags(mode, S_IWGRP)),
        ("Group Exec", has_flags(mode, S_IXGRP)),
        ("Others Read", has_flags(mode, S_IROTH)),
        ("Others Write", has_flags(mode, S_IWOTH)),
        ("Others Exec", has_flags(mode, S_IXOTH)),
    ];

    flags
        .into_iter()
        .map(|(label, set)| StatRow::new(label, if set { "True" } else { "False" }))
        .collect()
}

fn format_optional_time(time: Option<SystemTime>) -> String {
    time.map(format_utc).unwrap_or_else(|| "-".to_string())
}

/// Inode change time on unix, which is what `ls -lc` shows. Birth time elsewhere.
fn created_time(meta: &Metadata) -> Option<SystemTime> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        use std::time::{Duration, UNIX_EPOCH};
        let secs = u64::try_from(meta.ctime()).ok()?;
        let nanos = u32::try_from(meta.ctime_nsec()).unwrap_or(0);
        Some(UNIX_EPOCH + Duration::new(secs, nanos))
    }
    #[cfg(not(unix))]
    {
        meta.created().ok()
    }
}

fn owner_string(meta: &Metadata) -> String {
    #[cfg(unix)]
    {
        use nix::unistd::{Uid, User};
        use std::os::unix::fs::MetadataExt;

        let uid = meta.uid();
        match User::from_uid(Uid::from_raw(uid)) {
            Ok(Some(user)) => owner_label(uid, &user.name, &user.gecos.to_string_lossy()),
            Ok(None) => uid.to_string(),
            Err(e) => {
                tracing::debug!(uid, error = %e, "user lookup failed");
                uid.to_string()
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = meta;
        "-".to_string()
    }
}

/// `"Full Name (uid=name)"`, the full name being the first field of the GECOS entry.
#[cfg(unix)]
fn owner_label(uid: u32, name: &str, gecos: &str) -> String {
    let desc = gecos.split(',').next().unwrap_or_default().trim();
    if desc.is_empty() {
        format!("({uid}={name})")
    } else {
        format!("{desc} ({uid}={name})")
    }
}

fn group_string(meta: &Metadata) -> String {
    #[cfg(unix)]
    {
        use nix::unistd::{Gid, Group};
        use std::os::unix::fs::MetadataExt;

        let gid = meta.gid();
        match Group::from_gid(Gid::from_raw(gid)) {
            Ok(Some(group)) => format!("{}={}", gid, group.name),
            _ => gid.to_string(),
        }
    }
    #[cfg(not(unix))]
    {
        let _ = meta;
        "-".to_string()
    }
}

/// Cleans a line for a fixed width cell
/// by removing control characters, expanding tabs to 4 spaces,
/// and truncating or padding the string to fit exactly.
/// # Returns
/// A sanitized string that fits exactly within `width` columns.
pub fn sanitize_to_exact_width(line: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut current_w = 0;

    for char in line.chars() {
        if char == '\t' {
            let space_count = 4 - (current_w % 4);
            if current_w + space_count > width {
                break;
            }
            out.push_str(&" ".repeat(space_count));
            current_w += space_count;
            continue;
        }

        if char.is_control() {
            continue;
        }

        let w = char.width().unwrap_or(0);
        if current_w + w > width {
            break;
        }

        out.push(char);
        current_w += w;
    }

    if current_w < width {
        out.push_str(&" ".repeat(width - current_w));
    }

    out
}
