use divan::AllocProfiler;

#[global_allocator]
static ALLOC: AllocProfiler = AllocProfiler::system();

fn main() {
    divan::main();
}

fn build_archive(files: usize) -> gear_narc::NarcArchive {
    let mut narc = gear_narc::NarcArchive::new();
    let root = narc.tree.root();
    for folder_index in 0..files / 16 + 1 {
        let folder = narc
            .tree
            .add_folder(root, format!("folder{folder_index:03}"))
            .unwrap();
        for file_index in 0..16.min(files - folder_index * 16) {
            narc.tree
                .add_leaf(folder, format!("file{file_index:02}.bin"), vec![file_index as u8; 300])
                .unwrap();
        }
    }
    narc
}

pub mod read {
    use divan::Bencher;
    use gear_narc::NarcArchive;

    #[divan::bench(args = [16, 256, 1024])]
    fn from_bytes(bencher: Bencher, files: usize) {
        bencher
            .with_inputs(|| super::build_archive(files).to_bytes().unwrap())
            .bench_refs(|data| {
                divan::black_box(NarcArchive::from_bytes(data).unwrap());
            });
    }
}

pub mod write {
    use divan::Bencher;

    #[divan::bench(args = [16, 256, 1024])]
    fn to_bytes(bencher: Bencher, files: usize) {
        bencher
            .with_inputs(|| super::build_archive(files))
            .bench_refs(|narc| {
                divan::black_box(narc.to_bytes().unwrap());
            });
    }
}
