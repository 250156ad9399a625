//! LPS Format Reference
//!
//! This module documents the LPS text format as read and written by this
//! library. It contains no code.
//!
//! # Overview
//!
//! LPS stores small keyed records, one per text line. It is meant to be
//! written and patched by programs (save games, settings, caches) while still
//! being readable in a text editor.
//!
//! # Lines
//!
//! ```text
//! name[#info]:|[child[#info]:|]*[trailing text][///comment]
//! ```
//!
//! - The **header** is everything before the first `:|`. Its first `#` splits
//!   the name from the stored info; a header without `#` has an empty info.
//! - Every following segment that is itself terminated by `:|` is a **child**
//!   (a [`Sub`](crate::Sub)), parsed the same way as the header.
//! - Whatever follows the last `:|` is the **trailing text**, kept verbatim in
//!   stored form.
//! - Everything after the first `///` is the **comment**. It is never escaped
//!   and never interpreted.
//!
//! ```text
//! money#10500:|
//! computer:|name#我的电脑:|cores#8:|
//! item#sword:|atk#12:|sharp/com shiny///found in the cave
//! ```
//!
//! A line with no `:|` at all has a single segment, which is read as both the
//! header and the trailing text. On output the header delimiter is always
//! written, so `flag` is written back as `flag:|flag`.
//!
//! ## Children
//!
//! Children are leaf records: a child segment has a name and an info and
//! nothing else. How duplicates are handled depends on the storage strategy:
//!
//! | Strategy | Duplicate names | Positional access |
//! |----------|-----------------|-------------------|
//! | [`Ordered`](crate::Ordered) | kept, in order | yes |
//! | [`Unique`](crate::Unique) | later replaces earlier, first position kept | no, returns [`Error::UnsupportedOperation`](crate::Error::UnsupportedOperation) |
//!
//! # Escaping
//!
//! Stored text never contains a structural token. Display text is encoded by
//! applying these literal replacements in order:
//!
//! | Step | Display | Stored |
//! |------|---------|--------|
//! | 1 | `\|` | `/\|` |
//! | 2 | `/` | `/!` |
//! | 3 | `:\|` | `/stop` |
//! | 4 | tab | `/tab` |
//! | 5 | newline | `/n` |
//! | 6 | carriage return | `/r` |
//! | 7 | `#` | `/id` |
//! | 8 | `,` | `/com` |
//!
//! Decoding applies the inverse replacements in mirror order, with `/!` and
//! `/|` last. Decoding also turns `/equ` into `=`; encoding never produces it.
//!
//! Names are not escaped. Callers keep `#`, `:|` and newlines out of names.
//!
//! # Values
//!
//! An info holds one [`Value`](crate::Value). Values read from text stay text
//! until a typed setter replaces them; typed getters read text leniently and
//! fall back to zero, `false` or the Unix epoch.
//!
//! | Type | Stored form |
//! |------|-------------|
//! | integer | `-42` |
//! | double | shortest round-trip decimal, `3.141592653589793` |
//! | float | fixed decimal, up to nine fractional digits, `6969.69` |
//! | boolean | `true` / `false` (reading also accepts any case and numbers) |
//! | datetime | RFC 3339 in UTC, `2024-05-01T12:00:00Z` |
//!
//! A multi-valued info is a `,`-separated list of stored items. Empty items are
//! skipped when reading.
//!
//! # Identity
//!
//! Records are equal when their 64-bit content hashes are equal. The string
//! hash is the first eight bytes of the MD5 digest of the UTF-8 text, read as
//! a little-endian `i64`. With wrapping arithmetic:
//!
//! ```text
//! sub  = hash(name) * 2 + hash(stored info) * 3
//! line = hash(name) * 2 + hash(stored info) * 3 + hash(trailing text) * 4
//!        + sum of child hashes
//! ```
//!
//! The line hash does not depend on child order, while line comparison walks
//! the wire text, so two lines with reordered children are equal but do not
//! compare as `Equal`.
//!
//! # Documents
//!
//! A [`Document`](crate::Document) is a sequence of lines. Reading splits on
//! `\n`, removes every `\r` and skips blank lines. Writing joins the lines with
//! the configured [`LineEnding`](crate::LineEnding), `\n` by default, with no
//! final line ending unless requested.
//!
//! # Limitations
//!
//! - Children cannot nest; the grammar has no way to terminate a nested line.
//! - Names are written as given; a name containing a structural token does not
//!   read back.
//! - Comments may not contain a newline.
