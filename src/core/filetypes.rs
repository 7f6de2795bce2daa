//! Static file type tables for filenav.
//!
//! Maps lower-case file extensions to a [FileGroup] and to an optional human readable
//! description. Each group carries its own fallback description and Nerd Font icon.
//!
//! The tables are only ever matched against single name parts, see [crate::core::FileInfo].

use phf::phf_map;

/// Broad category a file or folder belongs to.
/// Decides the icon, the fallback description and what happens when the entry is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileGroup {
    Folder,
    File,
    App,
    Archive,
    Audio,
    Bundle,
    Code,
    CodeTags,
    Data,
    Document,
    Font,
    Git,
    Image,
    Text,
    Video,
}

impl FileGroup {
    /// Fallback description used when the extension has no description of its own.
    pub fn description(self) -> &'static str {
        match self {
            FileGroup::Folder => "Folder",
            FileGroup::File => "File",
            FileGroup::App => "Application",
            FileGroup::Archive => "Archive",
            FileGroup::Audio => "Audio File",
            FileGroup::Bundle => "Bundle",
            FileGroup::Code => "Source Code",
            FileGroup::CodeTags => "Markup File",
            FileGroup::Data => "Data File",
            FileGroup::Document => "Document",
            FileGroup::Font => "Font",
            FileGroup::Git => "Git Repository",
            FileGroup::Image => "Image",
            FileGroup::Text => "Text File",
            FileGroup::Video => "Video File",
        }
    }

    /// Nerd Font glyph for the group.
    pub fn icon(self) -> &'static str {
        match self {
            FileGroup::Folder => "\u{e5ff}",
            FileGroup::File => "\u{f15b}",
            FileGroup::App => "\u{f135}",
            FileGroup::Archive => "\u{f1c6}",
            FileGroup::Audio => "\u{f1c7}",
            FileGroup::Bundle => "\u{f487}",
            FileGroup::Code => "\u{f121}",
            FileGroup::CodeTags => "\u{f1c9}",
            FileGroup::Data => "\u{f1c0}",
            FileGroup::Document => "\u{f15c}",
            FileGroup::Font => "\u{f031}",
            FileGroup::Git => "\u{e702}",
            FileGroup::Image => "\u{f1c5}",
            FileGroup::Text => "\u{f0f6}",
            FileGroup::Video => "\u{f1c8}",
        }
    }
}

/// Extension to group mapping.
/// Every extension filenav knows about has an entry here.
pub static TYPE_GROUPS: phf::Map<&'static str, FileGroup> = phf_map! {
    // applications and bundles
    "app" => FileGroup::App,
    "exe" => FileGroup::App,
    "appimage" => FileGroup::App,
    "bundle" => FileGroup::Bundle,
    "framework" => FileGroup::Bundle,
    "plugin" => FileGroup::Bundle,
    "git" => FileGroup::Git,

    // archives
    "zip" => FileGroup::Archive,
    "tar" => FileGroup::Archive,
    "gz" => FileGroup::Archive,
    "tgz" => FileGroup::Archive,
    "bz2" => FileGroup::Archive,
    "xz" => FileGroup::Archive,
    "zst" => FileGroup::Archive,
    "7z" => FileGroup::Archive,
    "rar" => FileGroup::Archive,
    "deb" => FileGroup::Archive,
    "rpm" => FileGroup::Archive,
    "dmg" => FileGroup::Archive,
    "iso" => FileGroup::Archive,
    "whl" => FileGroup::Archive,
    "egg" => FileGroup::Archive,
    "jar" => FileGroup::Archive,

    // audio
    "mp3" => FileGroup::Audio,
    "wav" => FileGroup::Audio,
    "caf" => FileGroup::Audio,
    "aac" => FileGroup::Audio,
    "m4a" => FileGroup::Audio,
    "flac" => FileGroup::Audio,
    "ogg" => FileGroup::Audio,
    "opus" => FileGroup::Audio,
    "aiff" => FileGroup::Audio,
    "mid" => FileGroup::Audio,

    // source code
    "py" => FileGroup::Code,
    "pyw" => FileGroup::Code,
    "pyc" => FileGroup::Code,
    "rs" => FileGroup::Code,
    "c" => FileGroup::Code,
    "h" => FileGroup::Code,
    "cpp" => FileGroup::Code,
    "hpp" => FileGroup::Code,
    "m" => FileGroup::Code,
    "swift" => FileGroup::Code,
    "go" => FileGroup::Code,
    "java" => FileGroup::Code,
    "kt" => FileGroup::Code,
    "js" => FileGroup::Code,
    "ts" => FileGroup::Code,
    "lua" => FileGroup::Code,
    "rb" => FileGroup::Code,
    "php" => FileGroup::Code,
    "sh" => FileGroup::Code,
    "bash" => FileGroup::Code,
    "zsh" => FileGroup::Code,
    "ps1" => FileGroup::Code,
    "sql" => FileGroup::Code,
    "css" => FileGroup::Code,

    // markup
    "htm" => FileGroup::CodeTags,
    "html" => FileGroup::CodeTags,
    "xhtml" => FileGroup::CodeTags,
    "xml" => FileGroup::CodeTags,
    "plist" => FileGroup::CodeTags,
    "svg" => FileGroup::CodeTags,
    "xib" => FileGroup::CodeTags,
    "storyboard" => FileGroup::CodeTags,

    // data
    "json" => FileGroup::Data,
    "toml" => FileGroup::Data,
    "yaml" => FileGroup::Data,
    "yml" => FileGroup::Data,
    "csv" => FileGroup::Data,
    "db" => FileGroup::Data,
    "sqlite" => FileGroup::Data,
    "pyui" => FileGroup::Data,
    "lock" => FileGroup::Data,
    "bin" => FileGroup::Data,
    "dat" => FileGroup::Data,

    // documents
    "pdf" => FileGroup::Document,
    "doc" => FileGroup::Document,
    "docx" => FileGroup::Document,
    "xls" => FileGroup::Document,
    "xlsx" => FileGroup::Document,
    "ppt" => FileGroup::Document,
    "pptx" => FileGroup::Document,
    "odt" => FileGroup::Document,
    "rtf" => FileGroup::Document,
    "epub" => FileGroup::Document,

    // fonts
    "ttf" => FileGroup::Font,
    "otf" => FileGroup::Font,
    "woff" => FileGroup::Font,
    "woff2" => FileGroup::Font,

    // images
    "png" => FileGroup::Image,
    "jpg" => FileGroup::Image,
    "jpeg" => FileGroup::Image,
    "gif" => FileGroup::Image,
    "bmp" => FileGroup::Image,
    "tif" => FileGroup::Image,
    "tiff" => FileGroup::Image,
    "ico" => FileGroup::Image,
    "icns" => FileGroup::Image,
    "webp" => FileGroup::Image,
    "heic" => FileGroup::Image,

    // plain text
    "txt" => FileGroup::Text,
    "text" => FileGroup::Text,
    "md" => FileGroup::Text,
    "markdown" => FileGroup::Text,
    "rst" => FileGroup::Text,
    "log" => FileGroup::Text,
    "cfg" => FileGroup::Text,
    "conf" => FileGroup::Text,
    "ini" => FileGroup::Text,
    "diff" => FileGroup::Text,
    "patch" => FileGroup::Text,
    "readme" => FileGroup::Text,

    // video
    "mp4" => FileGroup::Video,
    "m4v" => FileGroup::Video,
    "mov" => FileGroup::Video,
    "mkv" => FileGroup::Video,
    "avi" => FileGroup::Video,
    "webm" => FileGroup::Video,
};

/// Extension specific descriptions.
///
/// A missing key falls back to [FileGroup::description].
/// A `None` value falls back to the plain "File"/"Folder" description instead, which is used
/// for extensions that are too generic to describe.
pub static FILE_EXTS: phf::Map<&'static str, Option<&'static str>> = phf_map! {
    "app" => Some("Application Bundle"),
    "exe" => Some("Windows Executable"),
    "appimage" => Some("AppImage"),
    "framework" => Some("Framework Bundle"),
    "git" => Some("Git Repository"),

    "zip" => Some("ZIP Archive"),
    "tar" => Some("Tape Archive"),
    "gz" => Some("GZip Archive"),
    "tgz" => Some("GZip Tape Archive"),
    "bz2" => Some("BZip2 Archive"),
    "xz" => Some("XZ Archive"),
    "zst" => Some("Zstandard Archive"),
    "7z" => Some("7-Zip Archive"),
    "rar" => Some("RAR Archive"),
    "deb" => Some("Debian Package"),
    "rpm" => Some("RPM Package"),
    "dmg" => Some("Disk Image"),
    "iso" => Some("ISO Disk Image"),
    "whl" => Some("Python Wheel"),
    "egg" => Some("Python Egg"),
    "jar" => Some("Java Archive"),

    "mp3" => Some("MP3 Audio"),
    "wav" => Some("Waveform Audio"),
    "caf" => Some("Core Audio File"),
    "aac" => Some("AAC Audio"),
    "m4a" => Some("MPEG-4 Audio"),
    "flac" => Some("FLAC Audio"),
    "ogg" => Some("Ogg Vorbis Audio"),
    "opus" => Some("Opus Audio"),
    "aiff" => Some("AIFF Audio"),
    "mid" => Some("MIDI Sequence"),

    "py" => Some("Python Script"),
    "pyw" => Some("Python Script (no console)"),
    "pyc" => Some("Compiled Python Bytecode"),
    "rs" => Some("Rust Source"),
    "c" => Some("C Source"),
    "h" => Some("C Header"),
    "cpp" => Some("C++ Source"),
    "hpp" => Some("C++ Header"),
    "m" => Some("Objective-C Source"),
    "swift" => Some("Swift Source"),
    "go" => Some("Go Source"),
    "java" => Some("Java Source"),
    "kt" => Some("Kotlin Source"),
    "js" => Some("JavaScript"),
    "ts" => Some("TypeScript"),
    "lua" => Some("Lua Script"),
    "rb" => Some("Ruby Script"),
    "php" => Some("PHP Script"),
    "sh" => Some("Shell Script"),
    "bash" => Some("Bash Script"),
    "zsh" => Some("Zsh Script"),
    "ps1" => Some("PowerShell Script"),
    "sql" => Some("SQL Script"),
    "css" => Some("CSS Stylesheet"),

    "htm" => Some("HTML Document"),
    "html" => Some("HTML Document"),
    "xhtml" => Some("XHTML Document"),
    "xml" => Some("XML Document"),
    "plist" => Some("Property List"),
    "svg" => Some("SVG Vector Image"),
    "xib" => Some("Interface Builder Document"),
    "storyboard" => Some("Interface Builder Storyboard"),

    "json" => Some("JSON File"),
    "toml" => Some("TOML File"),
    "yaml" => Some("YAML File"),
    "yml" => Some("YAML File"),
    "csv" => Some("Comma Separated Values"),
    "db" => Some("Database"),
    "sqlite" => Some("SQLite Database"),
    "pyui" => Some("Python UI File"),
    "lock" => Some("Lock File"),
    "bin" => None,
    "dat" => None,

    "pdf" => Some("PDF Document"),
    "doc" => Some("Word Document"),
    "docx" => Some("Word Document"),
    "xls" => Some("Excel Spreadsheet"),
    "xlsx" => Some("Excel Spreadsheet"),
    "ppt" => Some("PowerPoint Presentation"),
    "pptx" => Some("PowerPoint Presentation"),
    "odt" => Some("OpenDocument Text"),
    "rtf" => Some("Rich Text Document"),
    "epub" => Some("EPUB Book"),

    "ttf" => Some("TrueType Font"),
    "otf" => Some("OpenType Font"),
    "woff" => Some("Web Font"),
    "woff2" => Some("Web Font 2"),

    "png" => Some("PNG Image"),
    "jpg" => Some("JPEG Image"),
    "jpeg" => Some("JPEG Image"),
    "gif" => Some("GIF Image"),
    "bmp" => Some("Bitmap Image"),
    "tif" => Some("TIFF Image"),
    "tiff" => Some("TIFF Image"),
    "ico" => Some("Windows Icon"),
    "icns" => Some("Apple Icon Image"),
    "webp" => Some("WebP Image"),
    "heic" => Some("HEIC Image"),

    "txt" => Some("Plain Text"),
    "text" => Some("Plain Text"),
    "md" => Some("Markdown Document"),
    "markdown" => Some("Markdown Document"),
    "rst" => Some("reStructuredText Document"),
    "log" => Some("Log File"),
    "cfg" => Some("Configuration File"),
    "conf" => Some("Configuration File"),
    "ini" => Some("INI Configuration"),
    "diff" => Some("Diff"),
    "patch" => Some("Patch"),
    "readme" => Some("Read Me"),

    "mp4" => Some("MPEG-4 Video"),
    "m4v" => Some("MPEG-4 Video"),
    "mov" => Some("QuickTime Movie"),
    "mkv" => Some("Matroska Video"),
    "avi" => Some("AVI Video"),
    "webm" => Some("WebM Video"),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_description_has_a_group() {
        for ext in FILE_EXTS.keys() {
            assert!(
                TYPE_GROUPS.contains_key(*ext),
                "extension {:?} has a description but no group",
                ext
            );
        }
    }

    #[test]
    fn group_fallbacks_are_populated() {
        for group in TYPE_GROUPS.values() {
            assert!(!group.description().is_empty());
            assert!(!group.icon().is_empty());
        }
        assert_eq!(FileGroup::Folder.description(), "Folder");
        assert_eq!(FileGroup::File.description(), "File");
    }
}
