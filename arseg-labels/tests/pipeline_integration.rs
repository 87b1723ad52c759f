use std::fs;
use std::io::BufReader;

use arseg_core::EngineConfig;
use arseg_labels::{
    parse_tagged_line, read_sentences, reconstruct_tagged, Pipeline, PipelineConfig,
};
use tempfile::tempdir;

const CORPUS: &str = "\
والكتاب\tو:ال:كتاب
للبيت\tل:ال:بيت

وياااا\tو:يا
عني\tعن:ني
no-tab-record

كتب\tك:فرس
في\tفي
";

#[test]
fn labels_corpus_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("corpus.tsv");
    fs::write(&path, CORPUS).unwrap();

    let sentences = read_sentences(BufReader::new(fs::File::open(&path).unwrap())).unwrap();
    assert_eq!(sentences.len(), 3);

    let pipeline = Pipeline::new(PipelineConfig::default());
    let (lines, stats) = pipeline.training_lines(&sentences).unwrap();

    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[0],
        "و|||CONT ا|||BEGIN ل|||CONT ك|||BEGIN ت|||CONT ا|||CONT ب|||CONT .#. \
         ل|||CONT ل|||REW ب|||BEGIN ي|||CONT ت|||CONT"
    );
    assert_eq!(
        lines[1],
        "و|||CONT ي|||BEGIN ا|||CONT ا|||CONT ا|||CONT ا|||CONT .#. \
         ع|||CONT ن|||BEGIN ي|||CONT"
    );

    assert_eq!(stats.sentences, 3);
    assert_eq!(stats.written, 2);
    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.unrecognized_edits, 1);
    assert_eq!(stats.malformed_lines, 1);
}

#[test]
fn training_lines_rebuild_the_gold_segmentation() {
    let sentences = read_sentences(CORPUS.as_bytes()).unwrap();
    let pipeline = Pipeline::new(PipelineConfig::default());
    let (lines, _) = pipeline.training_lines(&sentences).unwrap();

    let words = parse_tagged_line(&lines[0]).unwrap();
    let rebuilt: Vec<String> = words
        .iter()
        .map(|word| reconstruct_tagged(word, true, ':').unwrap())
        .collect();
    assert_eq!(rebuilt, vec!["و:ال:كتاب", "ل:ال:بيت"]);
}

#[test]
fn aligns_tags_and_drops_mismatched_sentences() {
    let dir = tempdir().unwrap();
    let tags_path = dir.path().join("tags.txt");
    fs::write(
        &tags_path,
        "و|||CONJ ال|||DET كتاب|||NOUN ل|||PREP ال|||DET بيت|||NOUN\n\
         و|||CONJ\n\
         كتب|||VERB\n",
    )
    .unwrap();
    let tag_lines: Vec<String> = fs::read_to_string(&tags_path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect();

    let sentences = read_sentences(CORPUS.as_bytes()).unwrap();
    let pipeline = Pipeline::new(PipelineConfig::default());
    let (lines, stats) = pipeline.aligned_lines(&sentences, &tag_lines).unwrap();

    assert_eq!(
        lines,
        vec!["و>>>و|||CONJ ال>>>ال|||DET كتاب>>>كتاب|||NOUN ل>>>ل|||PREP ل>>>ال|||DET بيت>>>بيت|||NOUN"]
    );
    assert_eq!(stats.tag_mismatches, 1);
    assert_eq!(stats.skipped, 1);
}

#[test]
fn config_file_changes_marker() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("arseg.json");
    fs::write(&path, r#"{"engine":{"seg_marker":"+"}}"#).unwrap();

    let config = PipelineConfig::from_path(&path).unwrap();
    assert_eq!(config.engine, EngineConfig::with_marker('+'));

    let sentences = read_sentences("والكتاب\tو+ال+كتاب\n".as_bytes()).unwrap();
    let (lines, stats) = Pipeline::new(config).training_lines(&sentences).unwrap();
    assert_eq!(stats.written, 1);
    assert!(lines[0].contains("ا|||BEGIN"));
}
