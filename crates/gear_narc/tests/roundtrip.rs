use binrw::Endian;
use gear_core::Tree;
use gear_narc::{error::Result, NarcArchive, NarcWriteOptions};
use pretty_assertions::assert_eq;
use std::io::Cursor;
use tracing::info;
use tracing_test::traced_test;

fn sample_tree() -> Result<Tree> {
    let mut tree = Tree::new();
    let root = tree.root();

    let models = tree.add_folder(root, "models")?;
    tree.add_leaf(models, "pikachu.nsbmd", (0..=255u8).cycle().take(300).collect())?;
    let textures = tree.add_folder(models, "textures")?;
    tree.add_leaf(textures, "body.nsbtx", vec![0xAB; 129])?;
    tree.add_leaf(textures, "eyes.nsbtx", Vec::new())?;
    tree.add_leaf(models, "pikachu.nsbca", b"anim".to_vec())?;

    tree.add_leaf(root, "readme.txt", b"top level".to_vec())?;

    let sounds = tree.add_folder(root, "sounds")?;
    tree.add_leaf(sounds, "cry.swav", vec![0x7F; 128])?;

    Ok(tree)
}

#[traced_test]
#[test]
fn roundtrip_nested_tree() -> Result<()> {
    let mut narc = NarcArchive::new();
    narc.tree = sample_tree()?;

    let bytes = narc.to_bytes()?;
    assert!(gear_narc::identify(&bytes));
    assert_eq!(bytes.len() % 128, 0);

    let decoded = NarcArchive::read(Cursor::new(&bytes))?;
    for id in decoded.tree.leaves() {
        info!("decoded {}", decoded.tree.path(id));
    }

    assert_eq!(decoded.len(), 6);
    assert_eq!(decoded.byte_order, Endian::Little);
    assert_eq!(decoded.tree, narc.tree);

    Ok(())
}

#[traced_test]
#[test]
fn reencode_is_byte_identical() -> Result<()> {
    let mut narc = NarcArchive::new();
    narc.tree = sample_tree()?;
    let first = narc.to_bytes()?;

    let second = NarcArchive::from_bytes(&first)?.to_bytes()?;

    assert_eq!(first.len(), second.len());
    assert!(first == second);

    Ok(())
}

#[traced_test]
#[test]
fn roundtrip_big_endian() -> Result<()> {
    let mut narc = NarcArchive::new();
    narc.tree = sample_tree()?;

    let bytes = narc.write_with_options(
        Vec::new(),
        NarcWriteOptions::builder().byte_order(Endian::Big).build(),
    )?;
    assert_eq!(&bytes[4..6], &[0xFF, 0xFE]);

    let decoded = NarcArchive::from_bytes(&bytes)?;
    assert_eq!(decoded.byte_order, Endian::Big);
    assert_eq!(decoded.tree, narc.tree);

    // the stored order is kept when writing again
    assert!(decoded.to_bytes()? == bytes);

    Ok(())
}

#[test]
fn version_and_header_blob_survive() -> Result<()> {
    let mut narc = NarcArchive::new();
    narc.version = 0x0102;
    narc.bfnt_unknown = vec![1, 2, 3, 4, 5, 6, 7, 8];
    let root = narc.tree.root();
    narc.tree.add_leaf(root, "only", vec![9; 3])?;

    let decoded = NarcArchive::from_bytes(&narc.to_bytes()?)?;

    assert_eq!(decoded, narc);

    Ok(())
}

#[test]
fn read_from_offset() -> Result<()> {
    let mut narc = NarcArchive::new();
    let root = narc.tree.root();
    narc.tree.add_leaf(root, "a.bin", vec![1, 2, 3])?;

    let mut input = vec![0xEE; 16];
    input.extend(narc.to_bytes()?);

    let mut cursor = Cursor::new(input);
    cursor.set_position(16);
    let decoded = NarcArchive::read(&mut cursor)?;

    assert_eq!(decoded.tree, narc.tree);

    Ok(())
}
