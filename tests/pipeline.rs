//! End-to-end decode -> format -> append, against real files

use std::path::Path;

use climate_ingest::{
    decoder::{climate, get_decoder},
    error::ErrorKind,
    format::QuoteStyle,
    pipeline::Pipeline,
};

const HEADER: &str = "timestamp,city,aqi,weather_icon,wind_speed,humidity\n";
const HANOI: &[u8] = br#"{"timestamp":"2024-01-01T00:00:00Z","city":"Hanoi","aqi":42,"weather_icon":"01d","wind_speed":3.2,"humidity":55}"#;

async fn open(path: &Path) -> Pipeline {
    Pipeline::open(Box::new(climate::Decoder), path, QuoteStyle::Necessary, true)
        .await
        .unwrap()
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

#[tokio::test]
async fn valid_message_appends_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("received_data.csv");
    let mut p = open(&path).await;

    assert!(p.process(Some(HANOI)).await);
    assert_eq!(
        read(&path),
        format!("{HEADER}2024-01-01T00:00:00Z,Hanoi,42,01d,3.2,55\n")
    );
}

#[tokio::test]
async fn bad_messages_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("received_data.csv");
    let mut p = open(&path).await;

    let err = p.handle(Some("not-json".as_bytes())).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParseError);

    let err = p
        .handle(Some(r#"{"city":"Hanoi","aqi":42}"#.as_bytes()))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingFieldError);
    assert!(err.to_string().contains("timestamp"));

    let err = p.handle(Some(&[0xc3u8, 0x28][..])).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OtherError);

    let err = p.handle(Some("[1,2,3]".as_bytes())).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OtherError);

    assert_eq!(read(&path), HEADER);

    // loop keeps going after failures
    assert!(!p.process(Some("not-json".as_bytes())).await);
    assert!(p.process(Some(HANOI)).await);
    assert_eq!(read(&path).lines().count(), 2);
}

#[tokio::test]
async fn rows_keep_consumption_order_and_duplicates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("received_data.csv");
    let mut p = open(&path).await;

    for city in ["Hanoi", "Hue", "Hanoi"] {
        let msg = format!(
            r#"{{"timestamp":"t","city":"{city}","aqi":1,"weather_icon":"i","wind_speed":0,"humidity":0}}"#
        );
        assert!(p.process(Some(msg.as_bytes())).await);
    }
    let cities: Vec<String> = read(&path)
        .lines()
        .skip(1)
        .map(|l| l.split(',').nth(1).unwrap().to_owned())
        .collect();
    assert_eq!(cities, vec!["Hanoi", "Hue", "Hanoi"]);
}

#[tokio::test]
async fn reopening_appends_without_second_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("received_data.csv");
    {
        let mut p = open(&path).await;
        assert!(p.process(Some(HANOI)).await);
    }
    let before = read(&path);
    {
        let mut p = open(&path).await;
        assert!(p.process(Some(HANOI)).await);
    }
    let after = read(&path);
    assert!(after.starts_with(&before));
    assert_eq!(after.matches("timestamp,city").count(), 1);
    assert_eq!(after.lines().count(), 3);
}

#[tokio::test]
async fn empty_file_gets_single_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("received_data.csv");
    std::fs::write(&path, "").unwrap();
    let mut p = open(&path).await;
    assert!(p.process(Some(HANOI)).await);
    assert!(read(&path).starts_with(HEADER));
    assert_eq!(read(&path).matches(HEADER).count(), 1);
}

#[tokio::test]
async fn json_decoder_header_follows_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stations.csv");
    let custom: toml::Value = toml::from_str(r#"fields = ["id", "aqi"]"#).unwrap();
    let decoder = get_decoder("json", Some(custom)).unwrap();
    let mut p = Pipeline::open(decoder, &path, QuoteStyle::Never, false)
        .await
        .unwrap();
    assert!(p.process(Some(r#"{"aqi": null, "id": "st-1"}"#.as_bytes())).await);
    assert_eq!(read(&path), "id,aqi\nst-1,\n");
}
