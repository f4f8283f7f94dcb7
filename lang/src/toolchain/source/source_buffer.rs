use std::fs::File;
use std::io::Read;

use bstr::BStr;
use mmap_rs;

enum SourceBufferKind<'a> {
    File { buffer: mmap_rs::Mmap },
    Memory { bytes: &'a [u8] },
    Owned { bytes: Vec<u8> },
}

/// Keeps source bytes and a file name in the same object, so they provide the same lifetimes.
///
/// Input is treated as a byte sequence throughout the toolchain; nothing here checks that a
/// file contains valid utf-8.
pub struct SourceBuffer<'a> {
    kind: SourceBufferKind<'a>,
    file_name: String,
}

impl<'a> SourceBuffer<'a> {
    pub fn new_from_file(file_path: &std::path::Path) -> Result<SourceBuffer<'static>, mmap_rs::Error> {
        let file = File::open(file_path)?;
        let len = File::metadata(&file)?.len();
        let buffer = unsafe {
            mmap_rs::MmapOptions::new(len.try_into().unwrap())?.with_file(&file, 0).map()?
        };
        let file_name = String::from(file_path.to_string_lossy());
        Ok(SourceBuffer { kind: SourceBufferKind::File { buffer }, file_name })
    }

    pub fn new_from_string(string: &'a str, name: &str) -> Result<SourceBuffer<'a>, mmap_rs::Error> {
        SourceBuffer::new_from_bytes(string.as_bytes(), name)
    }

    pub fn new_from_bytes(bytes: &'a [u8], name: &str) -> Result<SourceBuffer<'a>, mmap_rs::Error> {
        let file_name = String::from(name);
        Ok(SourceBuffer { kind: SourceBufferKind::Memory { bytes }, file_name })
    }

    /// Reads standard input to exhaustion and retains the bytes in the buffer.
    pub fn new_from_stdin() -> Result<SourceBuffer<'static>, std::io::Error> {
        let mut bytes = Vec::new();
        std::io::stdin().read_to_end(&mut bytes)?;
        Ok(SourceBuffer { kind: SourceBufferKind::Owned { bytes }, file_name: String::from("<stdin>") })
    }

    pub fn code(&self) -> &BStr {
        match &self.kind {
            SourceBufferKind::File { buffer } => BStr::new(buffer.as_slice()),
            SourceBufferKind::Memory { bytes } => BStr::new(bytes),
            SourceBufferKind::Owned { bytes } => BStr::new(bytes),
        }
    }

    pub fn file_name(&self) -> &str {
        self.file_name.as_str()
    }
}
