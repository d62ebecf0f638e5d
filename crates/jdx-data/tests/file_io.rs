//! Integration tests for reading and writing data files on disk.

use jdx_data::writer::DEFAULT_TITLE;
use jdx_data::{ClassRef, Record, RecordReader, RecordWriter};
use tokio::fs::File;

const SAMPLE: &str = "\
;Java Package Dependency Data
;Thu Jul 16 10:21:44 2020
;sample.data
;
;
;Packages/Sources
Pcom.acme
SWidget
SGadget
Pcom.acme.util
SStrings
;
;Source Dependencies
D0.0>1.0
D0.1>1.0
D1.0>0.0
;
;Package Cycles
C0}1}
";

#[tokio::test]
async fn reads_a_complete_file() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let path = dir.path().join("sample.data");
    tokio::fs::write(&path, SAMPLE).await.unwrap();

    let file = File::open(&path).await.unwrap();
    let mut reader = RecordReader::new(file);
    let records = reader.read_all().await.unwrap();

    let counts = reader.counts();
    assert_eq!(counts.comments, 10);
    assert_eq!(counts.packages, 2);
    assert_eq!(counts.sources, 3);
    assert_eq!(counts.dependencies, 3);
    assert_eq!(counts.cycles, 1);
    assert_eq!(counts.total(), records.len());
    assert_eq!(reader.line_number(), 19);

    assert_eq!(records[2], Record::Comment("sample.data".into()));
    assert_eq!(records.last(), Some(&Record::Cycle(vec![0, 1])));
}

#[tokio::test]
async fn written_file_reads_back() {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let path = dir.path().join("out.data");

    let packages = [
        Record::Package("a".into()),
        Record::Source("X".into()),
        Record::Package("b".into()),
        Record::Source("Y".into()),
    ];
    let deps = [Record::Dependency {
        source: ClassRef::new(0, 0),
        target: ClassRef::new(1, 0),
    }];
    let cycles = [Record::Cycle(vec![0, 1])];

    let file = File::create(&path).await.unwrap();
    let mut writer = RecordWriter::new(file);
    writer.write_header(DEFAULT_TITLE, "out.data").await.unwrap();
    writer.write_block("Packages/Sources", &packages).await.unwrap();
    writer.write_block("Source Dependencies", &deps).await.unwrap();
    writer.write_block("Package Cycles", &cycles).await.unwrap();
    writer.flush().await.unwrap();

    let mut reader = RecordReader::new(File::open(&path).await.unwrap());
    let data: Vec<Record> = reader
        .read_all()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| !matches!(r, Record::Comment(_)))
        .collect();

    let expected: Vec<Record> = packages
        .iter()
        .chain(&deps)
        .chain(&cycles)
        .cloned()
        .collect();
    assert_eq!(data, expected);
}

#[tokio::test]
async fn unknown_tag_aborts_the_read() {
    let text = format!("{SAMPLE}X not a record\n");
    let mut reader = RecordReader::new(std::io::Cursor::new(text.into_bytes()));

    let err = reader.read_all().await.unwrap_err();
    assert_eq!(err.line(), Some(20));
    assert!(err.to_string().contains("unknown tag 'X'"));
}
