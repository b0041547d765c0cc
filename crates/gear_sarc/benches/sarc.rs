use divan::AllocProfiler;

#[global_allocator]
static ALLOC: AllocProfiler = AllocProfiler::system();

fn main() {
    divan::main();
}

fn build_archive(files: usize) -> gear_sarc::SarcArchive {
    let mut sarc = gear_sarc::SarcArchive::new();
    let root = sarc.tree.root();
    for index in 0..files {
        sarc.tree
            .add_leaf(root, format!("Layout/file{index:04}.bin"), vec![index as u8; 300])
            .unwrap();
    }
    sarc
}

pub mod read {
    use divan::Bencher;
    use gear_sarc::SarcArchive;

    #[divan::bench(args = [16, 256, 1024])]
    fn from_bytes(bencher: Bencher, files: usize) {
        bencher
            .with_inputs(|| super::build_archive(files).to_bytes().unwrap())
            .bench_refs(|data| {
                divan::black_box(SarcArchive::from_bytes(data).unwrap());
            });
    }
}

pub mod write {
    use divan::Bencher;

    #[divan::bench(args = [16, 256, 1024])]
    fn to_bytes(bencher: Bencher, files: usize) {
        bencher
            .with_inputs(|| super::build_archive(files))
            .bench_refs(|sarc| {
                divan::black_box(sarc.to_bytes().unwrap());
            });
    }
}
