//! Tests for rendering decoded recording documents.

use embla_cli::report::recording_table;
use embla_ingest::{CollectingSink, decode_document, decode_recording_text, extract_recording_info};

const RECORDING_XML: &str = r#"<RecordingInfo xmlns:dt="urn:schemas-microsoft-com:datatypes">
  <PatientInfo>
    <ID dt:dt="string">S042</ID>
    <Weight dt:dt="r8">79.5</Weight>
  </PatientInfo>
  <Device>
    <DeviceTypeID dt:dt="i4">113</DeviceTypeID>
    <DeviceID dt:dt="string">EM-7781</DeviceID>
    <DeviceName dt:dt="string">Embletta MPR</DeviceName>
  </Device>
  <RecordingInfo>
    <StartTime dt:dt="datetime">2019-02-11T22:00:00.000000</StartTime>
    <StopTime dt:dt="datetime">2019-02-11T22:30:00.500000</StopTime>
  </RecordingInfo>
</RecordingInfo>"#;

#[test]
fn renders_recording_fields() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("RecordingXML.xml");
    std::fs::write(&path, RECORDING_XML).expect("write document");

    let bytes = std::fs::read(&path).expect("read document");
    let xml = decode_recording_text(&bytes);
    let mut sink = CollectingSink::new();
    let document = decode_document(&xml, &mut sink).expect("decode");
    let info = extract_recording_info(&document, "RemLogic").expect("fields");
    let rendered = recording_table(&info).to_string();

    assert!(sink.is_empty());
    assert!(rendered.contains("S042"));
    assert!(rendered.contains("79.5"));
    assert!(rendered.contains("Embletta MPR"));
    assert!(rendered.contains("2019-02-11T22:00:00.000000"));
    assert!(rendered.contains("1800.500"));
}
