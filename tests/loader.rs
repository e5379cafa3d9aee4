use mips_sim::loader::{LoadError, load_data, load_program, parse_data, parse_program};

#[test]
fn program_lines_parse_in_order() {
    let words = parse_program("24080005\n24090003\n01095020\n0000000c\n").unwrap();
    assert_eq!(words, vec![0x2408_0005, 0x2409_0003, 0x0109_5020, 0x0000_000c]);
}

#[test]
fn program_tolerates_crlf_and_blank_lines() {
    let words = parse_program("2402000a\r\n\r\n0000000c\r\n").unwrap();
    assert_eq!(words, vec![0x2402_000a, 0x0000_000c]);
}

#[test]
fn program_rejects_short_line() {
    let err = parse_program("2402000a\n1234\n").unwrap_err();
    assert!(matches!(err, LoadError::BadLine { line: 2, ref text } if text == "1234"));
}

#[test]
fn program_rejects_non_hex() {
    assert!(matches!(
        parse_program("0000000g").unwrap_err(),
        LoadError::BadLine { line: 1, .. }
    ));
}

#[test]
fn data_bytes_are_reversed_per_line() {
    // "Hell" "o" then the sentinel
    let cells = parse_data("6c6c6548\n0000006f\n00000000\n").unwrap();
    assert_eq!(
        cells,
        vec![0x48, 0x65, 0x6c, 0x6c, 0x6f, 0, 0, 0, 0, 0, 0, 0]
    );
}

#[test]
fn data_stops_after_sentinel() {
    let cells = parse_data("00004948\n00000000\n41414141\n").unwrap();
    assert_eq!(cells, vec![0x48, 0x49, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn data_without_sentinel_reads_to_end() {
    let cells = parse_data("00004948").unwrap();
    assert_eq!(cells, vec![0x48, 0x49, 0, 0]);
}

#[test]
fn missing_file_names_the_path() {
    let err = load_program("/nonexistent/prog.text").unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("/nonexistent/prog.text"));
    assert!(load_data("/nonexistent/prog.data").is_err());
}

#[test]
fn fixture_files_load() {
    let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/programs");
    let program = load_program(format!("{dir}/hello.text")).unwrap();
    let data = load_data(format!("{dir}/hello.data")).unwrap();
    assert_eq!(program.last(), Some(&0x0000_000c));
    assert_eq!(&data[..4], &[0x48, 0x65, 0x6c, 0x6c]);
}
