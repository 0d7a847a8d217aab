use wavetrace::{
    data::{RawChange, RawValue, Sample},
    extract::{extract, ExtractOptions},
    load::{vcd::VcdLoader, LoadCatalog, LoadChanges, LoadTimescale},
};


const FILE_NAME: &'static str = "tests/data/pid.vcd";

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn load_vcd_test() {
    let loader = VcdLoader::new(FILE_NAME).unwrap();
    let catalog = loader.load_catalog().unwrap();

    let all: Vec<_> = catalog.names().collect();
    assert_eq!(
        vec![
            "tb.clk",
            "tb.target",
            "tb.uut.clk",
            "tb.uut.pos",
            "tb.uut.error_new",
            "tb.uut.pid_out",
            "tb.uut.idle",
            "tb.ref.pos",
        ],
        all
    );
    assert_eq!(catalog.get("tb.clk"), catalog.get("tb.uut.clk"));
    assert_eq!(Some("1 ns".to_string()), loader.load_timescale());

    let pos = catalog.get("tb.uut.pos").unwrap();
    let changes = loader.load_changes(pos).unwrap();
    assert_eq!(32, loader.load_width(pos).unwrap());
    assert_eq!(4, changes.len());
    assert_eq!(RawChange::new(0, RawValue::bits("x".repeat(32))), changes[0]);
    assert_eq!(RawChange::new(20, RawValue::bits(format!("{:032b}", 10))), changes[2]);

    let pid_out = catalog.get("tb.uut.pid_out").unwrap();
    assert_eq!(16, loader.load_width(pid_out).unwrap());
    assert_eq!(
        RawValue::bits("z".repeat(16)),
        loader.load_changes(pid_out).unwrap()[2].value
    );
}


#[test]
fn extract_vcd_test() {
    let loader = VcdLoader::new(FILE_NAME).unwrap();
    let options = ExtractOptions { bits: Some(32), preserve_steps: true };

    let res = extract(&loader, &names(&["pos", "error_new", "pid_out", "nope"]), &options).unwrap();

    let keys: Vec<_> = res.traces.keys().cloned().collect();
    assert_eq!(names(&["pos", "error_new"]), keys);
    assert_eq!(
        vec![
            Sample::new(10, 0),
            Sample::new(20, 0),
            Sample::new(20, 10),
            Sample::new(30, 10),
            Sample::new(30, -5),
        ],
        res.traces["pos"]
    );
    assert_eq!(
        vec![
            Sample::new(0, 0),
            Sample::new(20, 0),
            Sample::new(20, 90),
            Sample::new(30, 90),
            Sample::new(30, 105),
        ],
        res.traces["error_new"]
    );

    let failed: Vec<_> = res.failures.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(vec!["pid_out", "nope"], failed);
}


#[test]
fn extract_vcd_declared_width_test() {
    let loader = VcdLoader::new(FILE_NAME).unwrap();
    let options = ExtractOptions { bits: None, preserve_steps: false };

    let res = extract(&loader, &names(&["pid_out", "tb.ref.pos", "idle"]), &options).unwrap();

    assert!(res.failures.is_empty());
    assert_eq!(vec![Sample::new(20, -10)], res.traces["pid_out"]);
    assert_eq!(vec![Sample::new(0, 5)], res.traces["tb.ref.pos"]);
    assert!(res.traces["idle"].is_empty());
}
