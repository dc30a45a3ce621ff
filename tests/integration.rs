//! End-to-end tests against a synthetic, hand-built hive.
//!
//! There are no real registry hive fixtures checked into this repository, so
//! these tests construct a minimal but structurally valid hive byte-for-byte
//! and exercise the parser the way a real hive would be traversed: base
//! block, root key, subkey list, values (inline and indirect), extended
//! value types, and path resolution.

use hive_parser::header::{BASE_BLOCK_SIZE, REGF_SIGNATURE};
use hive_parser::{Hive, RegistryError, ValueData};

/// Builds cells sequentially within a single hbin and hands back the
/// relative (hbin-first) offset of each one.
struct HiveBuilder {
    cells: Vec<u8>,
}

impl HiveBuilder {
    fn new() -> Self {
        Self { cells: Vec::new() }
    }

    /// Appends an allocated cell and returns its offset relative to the
    /// first hbin (what on-disk offsets, e.g. `parent_offset`, point at).
    fn push(&mut self, payload: &[u8]) -> u32 {
        let offset = self.cells.len() as u32;
        let total_size = 4 + payload.len();
        self.cells.extend_from_slice(&(-(total_size as i32)).to_le_bytes());
        self.cells.extend_from_slice(payload);
        offset
    }

    /// Overwrites a u32 field inside an already-pushed cell. `field_offset`
    /// is relative to the cell's data, after the 4-byte size prefix.
    fn patch_u32(&mut self, cell_offset: u32, field_offset: usize, value: u32) {
        let start = cell_offset as usize + 4 + field_offset;
        self.cells[start..start + 4].copy_from_slice(&value.to_le_bytes());
    }

    /// Assembles the full hive image: base block + one hbin + all cells.
    fn finish(self, root_offset: u32) -> Vec<u8> {
        let mut data = vec![0u8; BASE_BLOCK_SIZE];
        data[0..4].copy_from_slice(REGF_SIGNATURE);
        data[0x14..0x18].copy_from_slice(&1u32.to_le_bytes()); // major version
        data[0x18..0x1C].copy_from_slice(&5u32.to_le_bytes()); // minor version
        data[0x24..0x28].copy_from_slice(&root_offset.to_le_bytes());

        let hbin_size = 32 + self.cells.len();
        let mut hbin = vec![0u8; 32];
        hbin[0..4].copy_from_slice(b"hbin");
        hbin[0x04..0x08].copy_from_slice(&0u32.to_le_bytes()); // first hbin, offset 0
        hbin[0x08..0x0C].copy_from_slice(&(hbin_size as u32).to_le_bytes());

        data.extend_from_slice(&hbin);
        data.extend_from_slice(&self.cells);
        data
    }
}

fn utf16le(s: &str) -> Vec<u8> {
    s.encode_utf16().flat_map(|u| u.to_le_bytes()).collect()
}

fn nk_cell(
    name: &str,
    parent_offset: u32,
    subkey_count: u32,
    subkey_list_offset: u32,
    value_count: u32,
    value_list_offset: u32,
    is_root: bool,
) -> Vec<u8> {
    let mut c = vec![0u8; 0x4C];
    c[0..2].copy_from_slice(b"nk");
    let flags: u16 = if is_root { 0x0004 } else { 0 };
    c[0x02..0x04].copy_from_slice(&flags.to_le_bytes());
    c[0x10..0x14].copy_from_slice(&parent_offset.to_le_bytes());
    c[0x14..0x18].copy_from_slice(&subkey_count.to_le_bytes());
    c[0x1C..0x20].copy_from_slice(&subkey_list_offset.to_le_bytes());
    c[0x24..0x28].copy_from_slice(&value_count.to_le_bytes());
    c[0x28..0x2C].copy_from_slice(&value_list_offset.to_le_bytes());
    let name_bytes = name.as_bytes();
    c[0x48..0x4A].copy_from_slice(&(name_bytes.len() as u16).to_le_bytes());
    c.extend_from_slice(name_bytes);
    c
}

fn vk_cell_inline(name: &str, data_type: u32, inline_bytes: [u8; 4], inline_len: u32) -> Vec<u8> {
    let mut c = vec![0u8; 0x14];
    c[0..2].copy_from_slice(b"vk");
    let name_bytes = name.as_bytes();
    c[0x02..0x04].copy_from_slice(&(name_bytes.len() as u16).to_le_bytes());
    let data_length_raw = 0x8000_0000u32 | inline_len;
    c[0x04..0x08].copy_from_slice(&data_length_raw.to_le_bytes());
    c[0x08..0x0C].copy_from_slice(&inline_bytes);
    c[0x0C..0x10].copy_from_slice(&data_type.to_le_bytes());
    c[0x10..0x12].copy_from_slice(&0x0001u16.to_le_bytes()); // ASCII name flag
    c.extend_from_slice(name_bytes);
    c
}

fn vk_cell_indirect(name: &str, data_type: u32, data_offset: u32, data_length: u32) -> Vec<u8> {
    let mut c = vec![0u8; 0x14];
    c[0..2].copy_from_slice(b"vk");
    let name_bytes = name.as_bytes();
    c[0x02..0x04].copy_from_slice(&(name_bytes.len() as u16).to_le_bytes());
    c[0x04..0x08].copy_from_slice(&data_length.to_le_bytes());
    c[0x08..0x0C].copy_from_slice(&data_offset.to_le_bytes());
    c[0x0C..0x10].copy_from_slice(&data_type.to_le_bytes());
    c[0x10..0x12].copy_from_slice(&0x0001u16.to_le_bytes());
    c.extend_from_slice(name_bytes);
    c
}

fn offset_list(offsets: &[u32]) -> Vec<u8> {
    let mut data = Vec::new();
    for o in offsets {
        data.extend_from_slice(&o.to_le_bytes());
    }
    data
}

fn li_cell(offsets: &[u32]) -> Vec<u8> {
    let mut c = Vec::new();
    c.extend_from_slice(b"li");
    c.extend_from_slice(&(offsets.len() as u16).to_le_bytes());
    c.extend_from_slice(&offset_list(offsets));
    c
}

/// Big data (`db`) header cell: signature, segment count, segment-list offset.
fn db_header_cell(segment_count: u16, segment_list_offset: u32) -> Vec<u8> {
    let mut c = vec![0u8; 8];
    c[0..2].copy_from_slice(b"db");
    c[0x02..0x04].copy_from_slice(&segment_count.to_le_bytes());
    c[0x04..0x08].copy_from_slice(&segment_list_offset.to_le_bytes());
    c
}

/// Builds: root -> "Child" (DWORD, REG_SZ, and RegUint32 values) ->
/// "Grandchild". Cells are written leaves-first so every offset a cell
/// needs is already known by the time that cell is built, except the two
/// parent-offset back-references (Child -> root, Grandchild -> Child),
/// which are patched in once the parent cell's offset exists.
fn build_sample_hive() -> Vec<u8> {
    let mut b = HiveBuilder::new();

    let version_string = utf16le("1.0");
    let version_data_offset = b.push(&version_string);

    let dword_value_offset = b.push(&vk_cell_inline("Count", 4, [0x2A, 0x00, 0x00, 0x00], 4));

    let string_value_offset = b.push(&vk_cell_indirect(
        "Version",
        1,
        version_data_offset,
        version_string.len() as u32,
    ));

    // RegUint32 (0x105), wrapped with its trailing 8-byte timestamp.
    let mut ext_payload = 7u32.to_le_bytes().to_vec();
    ext_payload.extend_from_slice(&0u64.to_le_bytes());
    let ext_data_offset = b.push(&ext_payload);
    let ext_value_offset = b.push(&vk_cell_indirect("Revision", 0x105, ext_data_offset, ext_payload.len() as u32));

    let child_value_list = b.push(&offset_list(&[dword_value_offset, string_value_offset, ext_value_offset]));

    // Grandchild's parent_offset is patched in once Child's offset exists.
    let grandchild_offset = b.push(&nk_cell("Grandchild", 0, 0, 0, 0, 0, false));
    let child_subkey_list = b.push(&li_cell(&[grandchild_offset]));

    // Child's parent_offset is patched in once root's offset exists.
    let child_offset = b.push(&nk_cell("Child", 0, 1, child_subkey_list, 3, child_value_list, false));
    b.patch_u32(grandchild_offset, 0x10, child_offset);

    let root_subkey_list = b.push(&li_cell(&[child_offset]));
    let root_offset = b.push(&nk_cell("", 0, 1, root_subkey_list, 0, 0, true));
    b.patch_u32(child_offset, 0x10, root_offset);

    b.finish(root_offset)
}

#[test]
fn test_open_synthetic_hive() {
    let hive = Hive::from_vec(build_sample_hive()).expect("open synthetic hive");
    assert_eq!(&hive.base_block().signature, REGF_SIGNATURE);
}

#[test]
fn test_root_and_child_enumeration() {
    let hive = Hive::from_vec(build_sample_hive()).expect("open synthetic hive");
    let root = hive.root_key().expect("root key");
    assert_eq!(root.name().unwrap(), "");

    let subkeys = root.subkeys().expect("subkeys");
    assert_eq!(subkeys.len(), 1);
    assert_eq!(subkeys[0].name().unwrap(), "Child");
}

#[test]
fn test_child_values() {
    let hive = Hive::from_vec(build_sample_hive()).expect("open synthetic hive");
    let root = hive.root_key().expect("root key");
    let child = &root.subkeys().unwrap()[0];

    let count = child.value("Count").expect("Count value");
    assert_eq!(count.get_u32().unwrap(), 0x2A);

    let version = child.value("Version").expect("Version value");
    assert_eq!(version.get_string().unwrap(), "1.0");

    let revision = child.value("Revision").expect("Revision value");
    match revision.data().unwrap() {
        ValueData::U32(v) => assert_eq!(v, 7),
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn test_typed_getter_rejects_wrong_family() {
    let hive = Hive::from_vec(build_sample_hive()).expect("open synthetic hive");
    let root = hive.root_key().expect("root key");
    let child = &root.subkeys().unwrap()[0];

    let count = child.value("Count").expect("Count value");
    assert!(count.get_string().is_err());
}

#[test]
fn test_grandchild_path() {
    let hive = Hive::from_vec(build_sample_hive()).expect("open synthetic hive");
    let root = hive.root_key().expect("root key");
    let child = &root.subkeys().unwrap()[0];
    let grandchild = &child.subkeys().unwrap()[0];

    assert_eq!(grandchild.path().unwrap(), "\\Child\\Grandchild");
}

#[test]
fn test_find_resolves_relative_path() {
    let hive = Hive::from_vec(build_sample_hive()).expect("open synthetic hive");
    let root = hive.root_key().expect("root key");

    let grandchild = root.find("Child\\Grandchild").expect("find");
    assert_eq!(grandchild.name().unwrap(), "Grandchild");

    assert!(root.find("NoSuchKey").is_err());
}

#[test]
fn test_deep_traversal_counts_match() {
    let hive = Hive::from_vec(build_sample_hive()).expect("open synthetic hive");
    let root = hive.root_key().expect("root key");

    fn count(key: &hive_parser::RegistryKey, keys: &mut usize, values: &mut usize) {
        *keys += 1;
        *values += key.values().map(|v| v.len()).unwrap_or(0);
        if let Ok(subkeys) = key.subkeys() {
            for sk in subkeys {
                count(&sk, keys, values);
            }
        }
    }

    let mut keys = 0;
    let mut values = 0;
    count(&root, &mut keys, &mut values);

    assert_eq!(keys, 3); // root, Child, Grandchild
    assert_eq!(values, 3); // Count, Version, Revision
}

#[test]
fn test_hbin_iteration() {
    let hive = Hive::from_vec(build_sample_hive()).expect("open synthetic hive");
    let hbins: Vec<_> = hive.hbins().collect::<Result<_, _>>().expect("hbin iteration");
    assert_eq!(hbins.len(), 1);
    assert_eq!(hbins[0].offset, 0);
}

/// A value just over `MAX_DIRECT_DATA_SIZE` (16344) stored as a genuine `db`
/// big-data block (header + segment offset list + two segment cells) round
/// trips through `Hive::read_value_data`/`read_big_data`, not just the
/// isolated `BigDataBlock::parse` unit tests.
#[test]
fn test_big_data_block_dispatch() {
    let mut b = HiveBuilder::new();

    let seg1_len = 10000usize;
    let seg2_len = 6354usize; // total 16354, 10 bytes over the threshold
    let seg1_data: Vec<u8> = (0..seg1_len).map(|i| (i % 256) as u8).collect();
    let seg2_data: Vec<u8> = (0..seg2_len).map(|i| ((i + 7) % 256) as u8).collect();
    let total_len = seg1_len + seg2_len;

    let seg1_offset = b.push(&seg1_data);
    let seg2_offset = b.push(&seg2_data);
    let segment_list_offset = b.push(&offset_list(&[seg1_offset, seg2_offset]));
    let db_offset = b.push(&db_header_cell(2, segment_list_offset));

    let value_offset = b.push(&vk_cell_indirect("Big", 3, db_offset, total_len as u32));
    let value_list = b.push(&offset_list(&[value_offset]));

    let root_offset = b.push(&nk_cell("", 0, 0, 0, 1, value_list, true));

    let hive = Hive::from_vec(b.finish(root_offset)).expect("open synthetic hive");
    let root = hive.root_key().expect("root key");
    let value = root.value("Big").expect("Big value");

    let data = match value.data().unwrap() {
        ValueData::Binary(bytes) => bytes,
        other => panic!("unexpected: {:?}", other),
    };

    let mut expected = seg1_data;
    expected.extend_from_slice(&seg2_data);
    assert_eq!(data, expected);
}

/// Two keys whose `parent_offset` fields point at each other (neither is the
/// root) make `path()` detect the cycle and fold it into a trailing
/// `"[path cycle]"` segment instead of looping forever.
#[test]
fn test_path_cycle_detection() {
    let mut b = HiveBuilder::new();

    // B's parent is patched to A once A's offset exists.
    let b_offset = b.push(&nk_cell("B", 0, 0, 0, 0, 0, false));
    let a_offset = b.push(&nk_cell("A", b_offset, 0, 0, 0, 0, false));
    b.patch_u32(b_offset, 0x10, a_offset);

    let hive = Hive::from_vec(b.finish(a_offset)).expect("open synthetic hive");
    let a = hive.get_key(a_offset).expect("key A");

    let path = a.path().expect("path despite cycle");
    assert!(path.ends_with("[path cycle]"), "path was {:?}", path);
}

/// `Hive::from_vec` rejects a base block with a corrupted signature instead
/// of panicking or silently accepting it.
#[test]
fn test_bad_magic_end_to_end() {
    let mut data = build_sample_hive();
    data[0..4].copy_from_slice(b"XXXX");

    let result = Hive::from_vec(data);
    assert!(matches!(result, Err(RegistryError::InvalidSignature { .. })));
}

/// `REG_MULTI_SZ` decodes to the actual list of strings, not just a
/// recognizable type name.
#[test]
fn test_multi_sz_decode() {
    let mut b = HiveBuilder::new();

    let mut multi_sz = utf16le("one");
    multi_sz.extend_from_slice(&0u16.to_le_bytes());
    multi_sz.extend_from_slice(&utf16le("two"));
    multi_sz.extend_from_slice(&0u16.to_le_bytes());
    multi_sz.extend_from_slice(&0u16.to_le_bytes());

    let data_offset = b.push(&multi_sz);
    let value_offset = b.push(&vk_cell_indirect("Strings", 7, data_offset, multi_sz.len() as u32));
    let value_list = b.push(&offset_list(&[value_offset]));
    let root_offset = b.push(&nk_cell("", 0, 0, 0, 1, value_list, true));

    let hive = Hive::from_vec(b.finish(root_offset)).expect("open synthetic hive");
    let root = hive.root_key().expect("root key");
    let value = root.value("Strings").expect("Strings value");

    match value.data().unwrap() {
        ValueData::MultiString(strings) => assert_eq!(strings, vec!["one".to_string(), "two".to_string()]),
        other => panic!("unexpected: {:?}", other),
    }
}

/// `RegistryValue::decode` with `overrun > 0` both widens the read window
/// past the declared length and switches to a non-NUL-trimming decode: a
/// trailing run of NULs real data happens to end with is preserved instead
/// of stripped.
#[test]
fn test_decode_overrun_uses_raw_string_decode() {
    let mut b = HiveBuilder::new();

    // Declared length covers only "AB"; the cell itself holds four more
    // trailing NUL bytes that a caller can recover via overrun.
    let mut stored = utf16le("AB");
    stored.extend_from_slice(&[0, 0, 0, 0]);

    let data_offset = b.push(&stored);
    let value_offset = b.push(&vk_cell_indirect("Cropped", 1, data_offset, 4));
    let value_list = b.push(&offset_list(&[value_offset]));
    let root_offset = b.push(&nk_cell("", 0, 0, 0, 1, value_list, true));

    let hive = Hive::from_vec(b.finish(root_offset)).expect("open synthetic hive");
    let root = hive.root_key().expect("root key");
    let value = root.value("Cropped").expect("Cropped value");

    match value.data().unwrap() {
        ValueData::String(s) => assert_eq!(s, "AB"),
        other => panic!("unexpected: {:?}", other),
    }

    match value.decode(4).unwrap() {
        ValueData::String(s) => assert_eq!(s, "AB\0\0"),
        other => panic!("unexpected: {:?}", other),
    }
}
