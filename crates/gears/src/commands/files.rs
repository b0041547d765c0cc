//! Moving node trees between archives and directories

use std::{
    collections::HashMap,
    fs::File,
    io::Write,
    path::{Component, Path, PathBuf},
};

use gear_core::{NodeId, Tree};
use miette::{miette, Context, IntoDiagnostic, Result};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Open `path` for writing, refusing to replace an existing file unless `overwrite`
pub fn create_output(path: &Path, overwrite: bool) -> Result<File> {
    let file = if !overwrite {
        File::create_new(path)
    } else {
        File::create(path)
    };
    file.into_diagnostic()
        .context(format!("creating {}", path.display()))
}

/// Read a whole input file
pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path)
        .into_diagnostic()
        .context(format!("path: {}", path.display()))
}

/// Build a tree from the contents of `directory`.
///
/// Entries are visited in file name order; sub directories become folders.
pub fn tree_from_directory(directory: &Path) -> Result<Tree> {
    let mut tree = Tree::new();
    let mut folders: HashMap<PathBuf, NodeId> = HashMap::new();
    folders.insert(PathBuf::new(), tree.root());

    for entry in WalkDir::new(directory).min_depth(1).sort_by_file_name() {
        let entry = entry.into_diagnostic()?;
        let relative = entry.path().strip_prefix(directory).into_diagnostic()?;

        let parent = relative
            .parent()
            .and_then(|p| folders.get(p))
            .copied()
            .ok_or(miette!("no folder for {}", relative.display()))?;
        let name = entry
            .file_name()
            .to_str()
            .ok_or(miette!("unable to convert {} to a string", relative.display()))?;

        if entry.file_type().is_dir() {
            let folder = tree.add_folder(parent, name)?;
            folders.insert(relative.to_path_buf(), folder);
        } else {
            debug!("adding {}", relative.display());
            let data = read_input(entry.path())?;
            tree.add_leaf(parent, name, data)?;
        }
    }

    Ok(tree)
}

/// Write every folder and leaf of `tree` below `directory`
pub fn write_tree(tree: &Tree, directory: &Path, overwrite: bool) -> Result<()> {
    std::fs::create_dir_all(directory)
        .into_diagnostic()
        .context(format!("creating {}", directory.display()))?;

    for (id, _) in tree.walk() {
        let relative = PathBuf::from(tree.path(id));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(miette!("refusing to write {} outside of the target", relative.display()));
        }
        let path = directory.join(relative);

        if tree.is_folder(id)? {
            std::fs::create_dir_all(&path)
                .into_diagnostic()
                .context(format!("creating {}", path.display()))?;
            continue;
        }

        info!("writing {}", path.display());
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .into_diagnostic()
                .context(format!("creating {}", parent.display()))?;
        }
        create_output(&path, overwrite)?
            .write_all(tree.data(id)?)
            .into_diagnostic()
            .context(format!("writing {}", path.display()))?;
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use gear_core::Tree;
    use pretty_assertions::assert_eq;

    use crate::commands::files::{tree_from_directory, write_tree};

    #[test]
    fn directory_roundtrip() -> miette::Result<()> {
        let directory = std::env::temp_dir().join(format!("gears-files-{}", std::process::id()));

        let mut tree = Tree::new();
        let root = tree.root();
        let models = tree.add_folder(root, "models")?;
        tree.add_leaf(models, "a.bin", vec![1, 2, 3])?;
        tree.add_leaf(root, "readme.txt", b"hi".to_vec())?;

        write_tree(&tree, &directory, false)?;
        let actual = tree_from_directory(&directory);
        let _ = std::fs::remove_dir_all(&directory);

        assert_eq!(actual?, tree);

        Ok(())
    }

    #[test]
    fn refuses_parent_components() -> miette::Result<()> {
        let directory = std::env::temp_dir().join(format!("gears-escape-{}", std::process::id()));

        let mut tree = Tree::new();
        let root = tree.root();
        tree.add_leaf(root, "../escape.bin", vec![1])?;

        let result = write_tree(&tree, &directory, false);
        let _ = std::fs::remove_dir_all(&directory);

        assert!(result.is_err());

        Ok(())
    }
}
