use kitforge_core::ManifestError;

/// Location of the manifest inside a jar.
pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";

pub const MANIFEST_VERSION: &str = "Manifest-Version";
pub const SIGNATURE_VERSION: &str = "Signature-Version";
pub const CLASS_PATH: &str = "Class-Path";
pub const NAME: &str = "Name";

/// Physical lines longer than this, terminator included, are rejected when reading.
const MAX_LINE_BYTES: usize = 512;
/// Serialized lines are wrapped at this many bytes, terminator excluded.
const WRAP_BYTES: usize = 72;
const MAX_NAME_CHARS: usize = 70;

/// Ordered `Name: Value` pairs; names compare ASCII case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name)
            .map(|index| self.entries[index].1.as_str())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Set a value. An existing attribute keeps its position and spelling.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.position(name) {
            Some(index) => self.entries[index].1 = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.position(name)
            .map(|index| self.entries.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(existing, _)| existing.eq_ignore_ascii_case(name))
    }
}

/// A per-entry section, introduced by a `Name:` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub attributes: Attributes,
}

/// Parsed `META-INF/MANIFEST.MF`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    main: Attributes,
    sections: Vec<Section>,
}

impl Manifest {
    /// Parse manifest bytes.
    ///
    /// Lines may end in CRLF, LF or CR. A line starting with a single space
    /// continues the previous header. A blank line closes the main section;
    /// every later section must start with a `Name` header. Sections sharing a
    /// name are merged, and a repeated header overwrites the earlier value.
    ///
    /// # Errors
    /// Returns the first malformed line found.
    pub fn parse(bytes: &[u8]) -> Result<Self, ManifestError> {
        let text = std::str::from_utf8(bytes).map_err(|_| ManifestError::InvalidUtf8)?;
        let mut parser = Parser::default();
        for (index, (line, terminator)) in lines(text).enumerate() {
            if line.len() + terminator > MAX_LINE_BYTES {
                return Err(ManifestError::LineTooLong { line: index + 1 });
            }
            parser.line(index + 1, line)?;
        }
        parser.finish()
    }

    #[must_use]
    pub const fn main_attributes(&self) -> &Attributes {
        &self.main
    }

    pub fn main_attributes_mut(&mut self) -> &mut Attributes {
        &mut self.main
    }

    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[must_use]
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.name == name)
    }

    /// Main attribute lookup.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.main.get(name)
    }

    #[must_use]
    pub fn class_path(&self) -> Option<&str> {
        self.main.get(CLASS_PATH)
    }

    /// Entries of the `Class-Path` attribute, if declared.
    #[must_use]
    pub fn class_path_entries(&self) -> Option<Vec<&str>> {
        self.class_path()
            .map(|value| value.split_whitespace().collect())
    }

    /// Serialize with CRLF terminators and 72-byte line wrapping.
    ///
    /// The version header (`Manifest-Version`, else `Signature-Version`) is
    /// written first; other attributes keep their order.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = String::new();
        let version = [MANIFEST_VERSION, SIGNATURE_VERSION]
            .into_iter()
            .find(|name| self.main.contains(name));
        if let Some(version) = version {
            if let Some((name, value)) = self
                .main
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(version))
            {
                write_header(&mut out, name, value);
            }
        }
        for (name, value) in self.main.iter() {
            if version.is_some_and(|version| name.eq_ignore_ascii_case(version)) {
                continue;
            }
            write_header(&mut out, name, value);
        }
        out.push_str("\r\n");

        for section in &self.sections {
            write_header(&mut out, NAME, &section.name);
            for (name, value) in section.attributes.iter() {
                write_header(&mut out, name, value);
            }
            out.push_str("\r\n");
        }
        out.into_bytes()
    }

    fn section_mut(&mut self, name: &str) -> &mut Section {
        let index = match self.sections.iter().position(|section| section.name == name) {
            Some(index) => index,
            None => {
                self.sections.push(Section {
                    name: name.to_string(),
                    attributes: Attributes::default(),
                });
                self.sections.len() - 1
            }
        };
        &mut self.sections[index]
    }
}

#[derive(Default)]
struct Parser {
    manifest: Manifest,
    in_main: bool,
    started: bool,
    /// Header whose value may still grow through continuation lines
    pending: Option<(String, String)>,
    /// Headers of the section being read
    current: Attributes,
    /// Line of the first header of the current section
    section_line: usize,
}

impl Parser {
    fn line(&mut self, number: usize, line: &str) -> Result<(), ManifestError> {
        if !self.started {
            self.started = true;
            self.in_main = true;
        }
        if line.is_empty() {
            return self.close_section();
        }
        if let Some(rest) = line.strip_prefix(' ') {
            return match self.pending.as_mut() {
                Some((_, value)) => {
                    value.push_str(rest);
                    Ok(())
                }
                None => Err(ManifestError::OrphanContinuation { line: number }),
            };
        }

        self.flush_pending();
        let (name, value) = line
            .split_once(": ")
            .ok_or(ManifestError::MissingSeparator { line: number })?;
        if !is_valid_name(name) {
            return Err(ManifestError::InvalidName {
                line: number,
                name: name.to_string(),
            });
        }
        if self.current.is_empty() && self.pending.is_none() {
            self.section_line = number;
        }
        self.pending = Some((name.to_string(), value.to_string()));
        Ok(())
    }

    fn flush_pending(&mut self) {
        if let Some((name, value)) = self.pending.take() {
            self.current.set(&name, value);
        }
    }

    fn close_section(&mut self) -> Result<(), ManifestError> {
        self.flush_pending();
        let mut attributes = std::mem::take(&mut self.current);
        if self.in_main {
            self.manifest.main = attributes;
            self.in_main = false;
            return Ok(());
        }
        if attributes.is_empty() {
            return Ok(());
        }
        let first_is_name = attributes
            .iter()
            .next()
            .is_some_and(|(name, _)| name.eq_ignore_ascii_case(NAME));
        let Some(name) = attributes.remove(NAME).filter(|_| first_is_name) else {
            return Err(ManifestError::MissingSectionName {
                line: self.section_line,
            });
        };
        let section = self.manifest.section_mut(&name);
        for (key, value) in attributes.iter() {
            section.attributes.set(key, value);
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Manifest, ManifestError> {
        self.close_section()?;
        Ok(self.manifest)
    }
}

/// Physical lines, accepting CRLF, LF and lone CR terminators.
/// Physical lines with the byte length of their terminator (0 for a last unterminated line).
fn lines(text: &str) -> impl Iterator<Item = (&str, usize)> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let (line, terminator) = match rest.find(['\r', '\n']) {
            Some(end) => {
                let terminator = if rest[end..].starts_with("\r\n") { 2 } else { 1 };
                (&rest[..end], terminator)
            }
            None => (rest, 0),
        };
        rest = &rest[line.len() + terminator..];
        Some((line, terminator))
    })
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_NAME_CHARS
        && name
            .bytes()
            .all(|byte| byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_')
}

fn write_header(out: &mut String, name: &str, value: &str) {
    let line = format!("{name}: {value}");
    let mut rest = line.as_str();
    let mut limit = WRAP_BYTES;
    loop {
        if rest.len() <= limit {
            out.push_str(rest);
            out.push_str("\r\n");
            return;
        }
        let mut cut = limit;
        while !rest.is_char_boundary(cut) {
            cut -= 1;
        }
        out.push_str(&rest[..cut]);
        out.push_str("\r\n ");
        rest = &rest[cut..];
        // continuation lines spend one byte on the leading space
        limit = WRAP_BYTES - 1;
    }
}
