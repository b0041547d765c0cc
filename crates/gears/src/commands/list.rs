use clap::Args;
use gear_core::Tree;
use itertools::Itertools;
use miette::Result;
use std::path::PathBuf;
use tracing::info;

use crate::{commands::files::read_input, format::decode_any};

#[derive(Args)]
pub struct ListArgs {
    /// An input NARC or SARC file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,
}

impl ListArgs {
    pub fn handle(&self) -> Result<()> {
        let data = read_input(&self.file)?;
        let (format, tree) = decode_any(&data)?;
        info!("{} archive with {} files", format, tree.leaf_count());

        println!("{}", listing(&tree)?);
        Ok(())
    }
}

/// One line per node, indented by depth; folders end with `/`
pub fn listing(tree: &Tree) -> Result<String> {
    let lines = tree
        .walk()
        .map(|(id, depth)| -> Result<String> {
            let indent = "  ".repeat(depth - 1);
            let node = tree.get(id)?;
            Ok(match node.data() {
                Some(data) => format!("{indent}{} ({} bytes)", node.name(), data.len()),
                None => format!("{indent}{}/", node.name()),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(lines.into_iter().join("\n"))
}

#[cfg(test)]
mod test {
    use gear_core::Tree;
    use pretty_assertions::assert_str_eq;

    use crate::commands::list::listing;

    #[test]
    fn listing_indents_by_depth() -> miette::Result<()> {
        let mut tree = Tree::new();
        let root = tree.root();
        let folder = tree.add_folder(root, "a")?;
        tree.add_leaf(folder, "b.bin", vec![0; 3])?;
        tree.add_leaf(root, "c.bin", vec![])?;

        let actual = listing(&tree)?;

        assert_str_eq!(actual, "a/\n  b.bin (3 bytes)\nc.bin (0 bytes)");

        Ok(())
    }
}
