//! Saving and loading configs and snapshots, in a compact binary format.

use std::{
    fs::File,
    io::{Read, Write},
    path::Path,
};

use bincode::{config, Decode, Encode};

use crate::SimError;

pub fn save<T: Encode>(path: &Path, data: &T) -> Result<(), SimError> {
    let encoded: Vec<u8> = bincode::encode_to_vec(data, config::standard())?;

    let mut file = File::create(path)?;
    file.write_all(&encoded)?;
    Ok(())
}

pub fn load<T: Decode<()>>(path: &Path) -> Result<T, SimError> {
    let mut file = File::open(path)?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;

    let (decoded, _len) = bincode::decode_from_slice(&buffer, config::standard())?;
    Ok(decoded)
}
