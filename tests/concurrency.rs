use std::fs;
use std::sync::{Arc, Barrier};
use std::thread;

use rax_fileio::DurableWriter;
use tempfile::TempDir;

const PAYLOAD_LEN: usize = 512 * 1024;

#[test]
fn synchronized_copies_into_one_destination_never_interleave() {
    let dir = TempDir::new().unwrap();
    let sources: Vec<_> = [b'a', b'b']
        .into_iter()
        .map(|fill| {
            let path = dir.path().join(format!("src_{}", fill as char));
            fs::write(&path, vec![fill; PAYLOAD_LEN]).unwrap();
            path
        })
        .collect();
    let destination = dir.path().join("shared/dst.bin");
    let writer = Arc::new(DurableWriter::with_buffer_size(1024));

    for _ in 0..5 {
        let barrier = Arc::new(Barrier::new(sources.len()));
        let handles: Vec<_> = sources
            .iter()
            .cloned()
            .map(|src| {
                let barrier = Arc::clone(&barrier);
                let writer = Arc::clone(&writer);
                let destination = destination.clone();
                thread::spawn(move || {
                    barrier.wait();
                    writer.copy_synchronized(&src, &destination)
                })
            })
            .collect();

        for handle in handles {
            let outcome = handle.join().unwrap().expect("copy should succeed");
            assert_eq!(outcome.bytes_written, PAYLOAD_LEN as u64);
        }

        let contents = fs::read(&destination).unwrap();
        assert_eq!(contents.len(), PAYLOAD_LEN);
        let first = contents[0];
        assert!(contents.iter().all(|&b| b == first));
    }
}

#[test]
fn synchronized_copies_to_distinct_destinations_all_complete() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("src.bin");
    fs::write(&src, vec![7u8; 4096]).unwrap();
    let writer = Arc::new(DurableWriter::default());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let writer = Arc::clone(&writer);
            let src = src.clone();
            let dst = dir.path().join(format!("out/{i}.bin"));
            thread::spawn(move || writer.copy_synchronized(&src, &dst).map(|_| dst))
        })
        .collect();

    for handle in handles {
        let dst = handle.join().unwrap().unwrap();
        assert_eq!(fs::read(dst).unwrap(), vec![7u8; 4096]);
    }
}
