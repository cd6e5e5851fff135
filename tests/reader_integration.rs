//! Integration tests: reading and writing BED files on disk

use bedtuple::core::{create_writer, BedError, BedParseError};
use bedtuple::formats::bed::{column, Bed12, Bed12Columns, Bed3Columns, Bed6Columns};
use bedtuple::formats::{read_all, Reader, Writer};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{Cursor, Write};
use tempfile::tempdir;

const BED6: &str = "browser position chr1:1-5000\n\
                    track name=genes\n\
                    chr1\t1000\t2000\tgene1\t500\t+\n\
                    chr1\t3000\t4000\tgene2\t0\t-\n\
                    \n\
                    chr2\t50\t100\tgene3\t900\t.\n";

const BED12: &str = "chr1\t1000\t2000\tgene1\t500\t+\t1100\t1900\t255,0,0\t2\t100,100\t0,900\n";

#[test]
fn test_read_plain_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("genes.bed");
    std::fs::write(&path, BED6).unwrap();

    let mut reader: Reader<_, Bed6Columns> = Reader::from_path(&path).unwrap();
    let records: Vec<_> = reader.by_ref().collect::<Result<_, _>>().unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[1].get::<{ column::NAME }>(), "gene2");
    assert_eq!(*records[2].get::<{ column::STRAND }>(), '.');
    assert_eq!(reader.headers().len(), 2);
    assert_eq!(reader.stats().parsed, 3);
}

#[test]
fn test_read_gzip_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("genes.bed.gz");

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(BED6.as_bytes()).unwrap();
    std::fs::write(&path, encoder.finish().unwrap()).unwrap();

    let reader: Reader<_, Bed3Columns> = Reader::from_path(&path).unwrap();
    let lines: Vec<String> = reader.map(|r| r.unwrap().to_text()).collect();
    assert_eq!(lines, vec!["chr1\t1000\t2000", "chr1\t3000\t4000", "chr2\t50\t100"]);
}

#[test]
fn test_bed12_file_roundtrip() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.bed");
    let output = dir.path().join("output.bed.gz");
    std::fs::write(&input, BED12).unwrap();

    let records: Vec<Bed12> = Reader::from_path(&input)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(*records[0].get::<{ column::BLOCK_COUNT }>(), 2);

    let mut writer = Writer::new(create_writer(&output).unwrap());
    writer.write_all_records(&records).unwrap();
    let sink = writer.finish().unwrap();
    assert!(sink.is_compressed());

    // read back before the sink is dropped
    let reader: Reader<_, Bed12Columns> = Reader::from_path(&output).unwrap();
    let reread: Vec<Bed12> = reader.collect::<Result<_, _>>().unwrap();
    assert_eq!(reread, records);
    assert_eq!(format!("{}\n", reread[0]), BED12);
    drop(sink);
}

#[test]
fn test_short_schema_reads_wide_file() {
    // BED12 lines read as BED3 keep only the leading columns
    let records: Vec<bedtuple::formats::Bed3> = read_all(Cursor::new(BED12)).unwrap();
    assert_eq!(records[0].to_text(), "chr1\t1000\t2000");
}

#[test]
fn test_wide_schema_rejects_short_file() {
    let result: Result<Vec<Bed12>, BedError> = read_all(Cursor::new(BED6));
    match result {
        Err(BedError::Parse { line, source }) => {
            assert_eq!(line, 3);
            assert_eq!(source, BedParseError::MissingField { column_index: 6 });
        }
        other => panic!("Expected a parse error, got {:?}", other),
    }
}

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    let result: Result<Reader<_, Bed3Columns>, BedError> =
        Reader::from_path(dir.path().join("absent.bed"));
    assert!(matches!(result, Err(BedError::Io(_))));
}
