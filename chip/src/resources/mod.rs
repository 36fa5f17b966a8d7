use std::{
    fs,
    io::{Read, Seek},
    path::Path,
};
use zip::read::ZipArchive;

use crate::{definitions::memory, RomError};

/// Represents an archive of roms, e.g. a zip file of a game collection
pub struct RomArchive<R: Read + Seek> {
    archive: ZipArchive<R>,
}

impl<R: Read + Seek> RomArchive<R> {
    /// Will open the rom archive from the given reader
    pub fn new(reader: R) -> Result<Self, RomError> {
        Ok(Self {
            archive: ZipArchive::new(reader)?,
        })
    }

    /// Will return all the rom names available to be chosen
    pub fn file_names(&self) -> Vec<&'_ str> {
        let mut names: Vec<_> = self.archive.file_names().collect();
        names.sort_unstable();
        names
    }

    /// Will decompress the rom with the given name
    pub fn get_file_data(&mut self, name: &str) -> Result<Rom, RomError> {
        let file = self.archive.by_name(name)?;
        let size = file.size() as usize;
        if size > memory::PROGRAM_MAX_SIZE {
            return Err(too_large(size));
        }

        let mut data = Vec::with_capacity(size);
        // the header size may lie, so the read itself is bounded as well
        file.take(memory::PROGRAM_MAX_SIZE as u64 + 1)
            .read_to_end(&mut data)?;
        Rom::new(name, data)
    }
}

fn too_large(size: usize) -> RomError {
    RomError::TooLarge {
        size,
        max: memory::PROGRAM_MAX_SIZE,
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Represents a single rom with it's information
pub struct Rom {
    /// The rom name
    name: String,
    /// The raw program image
    data: Box<[u8]>,
}

impl Rom {
    /// Will generate a new rom based of the given data, rejecting images that
    /// do not fit behind the interpreter area.
    ///
    /// # Example
    /// ```rust
    /// # use chip8_vm::{resources::Rom, RomError};
    /// let rom = Rom::new("jump", vec![0x12, 0x00]).expect("fits into memory");
    /// assert_eq!(rom.get_data(), &[0x12, 0x00]);
    /// assert!(matches!(
    ///     Rom::new("huge", vec![0; 4096]),
    ///     Err(RomError::TooLarge { size: 4096, max: 3584 })
    /// ));
    /// ```
    pub fn new<D: Into<Vec<u8>>>(name: &str, data: D) -> Result<Self, RomError> {
        let data = data.into();
        if data.len() > memory::PROGRAM_MAX_SIZE {
            return Err(too_large(data.len()));
        }

        Ok(Rom {
            name: name.to_string(),
            data: data.into_boxed_slice(),
        })
    }

    /// Will read the rom from the file system, the name is the file name.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RomError> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        log::debug!("read rom '{}' with {} bytes", name, data.len());
        Rom::new(&name, data)
    }

    /// Will return a slice internal values of the given data
    pub fn get_data(&self) -> &[u8] {
        &self.data
    }

    /// Will return the name of the rom.
    pub fn get_name(&self) -> &str {
        &self.name
    }
}
