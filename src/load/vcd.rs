use super::*;

use std::path::Path;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::collections::HashMap;
use ::vcd::{ self, Parser, ScopeItem, Header, Value };
use tracing::debug;

type SignalMap = HashMap<vcd::IdCode, usize>;

pub struct VcdLoader {
    catalog: SignalCatalog,
    widths: Vec<u32>,
    changes: Vec<Vec<RawChange>>,
    timescale: Option<String>,
}

impl VcdLoader {
    pub fn new(filename: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(filename.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut parser = Parser::new(reader);

        let header = parser.parse_header()?;
        let timescale = header.timescale
            .as_ref()
            .map(|(n, unit)| format!("{} {}", n, unit));
        let (catalog, widths, ids) = Self::load_all_scopes(&header);
        let changes = Self::load_all_changes(&mut parser, &ids, &widths)?;

        debug!(
            signals = catalog.len(),
            changes = changes.iter().map(|c| c.len()).sum::<usize>(),
            "loaded vcd"
        );

        Ok(Self {
            catalog,
            widths,
            changes,
            timescale,
        })
    }

    fn load_all_scopes(header: &Header) -> (SignalCatalog, Vec<u32>, SignalMap) {
        let mut catalog = SignalCatalog::new();
        let mut widths = vec![];
        let mut sigmap = SignalMap::new();

        Self::load_scope("", &header.items, &mut catalog, &mut widths, &mut sigmap);

        (catalog, widths, sigmap)
    }

    fn load_scope(
        prefix: &str,
        items: &[ScopeItem],
        catalog: &mut SignalCatalog,
        widths: &mut Vec<u32>,
        sigmap: &mut SignalMap,
    ) {
        for item in items.iter() {
            match item {
                ScopeItem::Var(var) => {
                    let name = format!("{}{}", prefix, var.reference);

                    // several variables may share one id code
                    let index = *sigmap.entry(var.code).or_insert_with(|| {
                        widths.push(var.size);
                        widths.len() - 1
                    });

                    catalog.insert(name, SignalHandle(index));
                }

                ScopeItem::Scope(sub_scope) => {
                    let new_prefix = format!("{}{}.", prefix, sub_scope.identifier);
                    Self::load_scope(&new_prefix, &sub_scope.items, catalog, widths, sigmap);
                }

                _ => {}
            }
        }
    }

    fn value_char(x: &Value) -> char {
        match x {
            Value::V0 => '0',
            Value::V1 => '1',
            Value::Z => 'z',
            _ => 'x',
        }
    }

    /// Left-extend a vector to `width` digits. Values starting with `x` or
    /// `z` are extended with that digit, everything else with `0`.
    fn extend_vector(digits: String, width: u32) -> RawValue {
        let len = digits.chars().count();
        let width = width as usize;

        if len >= width {
            return RawValue::Bits(digits);
        }

        let fill = match digits.chars().next() {
            Some('x') => 'x',
            Some('z') => 'z',
            _ => '0',
        };

        let mut extended: String = std::iter::repeat(fill).take(width - len).collect();
        extended.push_str(&digits);

        RawValue::Bits(extended)
    }

    fn load_all_changes<R: BufRead>(parser: &mut Parser<R>,
        ids: &SignalMap,
        widths: &[u32],
    ) -> Result<Vec<Vec<RawChange>>> {
        let mut rv: Vec<Vec<RawChange>> = vec![vec![]; widths.len()];
        let mut cur_t = 0;

        for command in parser {
            let command = command?;

            use vcd::Command::*;
            match command {
                Timestamp(t) => {
                    cur_t = t;
                }

                ChangeScalar(i, v) => {
                    if let Some(index) = ids.get(&i) {
                        let value = Self::extend_vector(Self::value_char(&v).to_string(), widths[*index]);
                        rv[*index].push(RawChange::new(cur_t, value));
                    }
                }

                ChangeVector(i, v) => {
                    if let Some(index) = ids.get(&i) {
                        let digits: String = v.iter()
                            .map(|bit| Self::value_char(&bit))
                            .collect();
                        let value = Self::extend_vector(digits, widths[*index]);
                        rv[*index].push(RawChange::new(cur_t, value));
                    }
                }

                _ => ()
            }
        }

        Ok(rv)
    }
}


impl LoadCatalog for VcdLoader {
    fn load_catalog(&self) -> Result<SignalCatalog> {
        Ok(self.catalog.clone())
    }
}


impl LoadChanges for VcdLoader {
    fn load_changes(&self, handle: SignalHandle) -> Result<&[RawChange]> {
        self.changes.get(handle.0)
            .map(|c| c.as_slice())
            .ok_or(Error::UnknownHandle(handle.0))
    }

    fn load_width(&self, handle: SignalHandle) -> Result<u32> {
        self.widths.get(handle.0)
            .copied()
            .ok_or(Error::UnknownHandle(handle.0))
    }
}


impl LoadTimescale for VcdLoader {
    fn load_timescale(&self) -> Option<String> {
        self.timescale.clone()
    }
}


#[cfg(test)]
mod test {
    use super::*;

    const COUNTER_VCD: &str = "\
$timescale 1 ns $end
$scope module top $end
$var wire 1 ! clk $end
$scope module uut $end
$var reg 4 \" count [3:0] $end
$var wire 1 ! clk $end
$upscope $end
$upscope $end
$enddefinitions $end
#0
$dumpvars
0!
bx \"
$end
#5
1!
b10 \"
#10
0!
b1110 \"
#15
z!
";

    fn load() -> VcdLoader {
        VcdLoader::from_reader(COUNTER_VCD.as_bytes()).unwrap()
    }

    #[test]
    fn test_catalog_order_and_aliases() {
        let loader = load();
        let catalog = loader.load_catalog().unwrap();

        let names: Vec<_> = catalog.names().collect();
        assert_eq!(vec!["top.clk", "top.uut.count", "top.uut.clk"], names);
        assert_eq!(catalog.get("top.clk"), catalog.get("top.uut.clk"));
        assert_eq!(Some("1 ns".to_string()), loader.load_timescale());
    }

    #[test]
    fn test_changes_are_extended() {
        let loader = load();
        let catalog = loader.load_catalog().unwrap();
        let count = catalog.get("top.uut.count").unwrap();

        assert_eq!(4, loader.load_width(count).unwrap());
        assert_eq!(
            &[
                RawChange::new(0, RawValue::bits("xxxx")),
                RawChange::new(5, RawValue::bits("0010")),
                RawChange::new(10, RawValue::bits("1110")),
            ][..],
            loader.load_changes(count).unwrap()
        );

        let clk = catalog.get("top.clk").unwrap();
        let clk_values: Vec<_> = loader.load_changes(clk).unwrap()
            .iter()
            .map(|c| c.value.to_string())
            .collect();
        assert_eq!(vec!["0", "1", "0", "z"], clk_values);
    }

    #[test]
    fn test_unknown_handle() {
        let loader = load();

        assert!(matches!(loader.load_changes(SignalHandle(17)), Err(Error::UnknownHandle(17))));
        assert!(matches!(loader.load_width(SignalHandle(17)), Err(Error::UnknownHandle(17))));
    }

    const NESTED_VCD: &str = "\
$timescale 10 ps $end
$scope module top $end
$scope module core $end
$scope module alu $end
$var reg 4 % acc [3:0] $end
$var real 64 & gain $end
$upscope $end
$upscope $end
$upscope $end
$enddefinitions $end
#0
b1 %
r1.5 &
#3
b10x %
#5
bz %
#7
b1111 %
r2.25 &
";

    #[test]
    fn test_nested_scopes_and_short_vectors() {
        let loader = VcdLoader::from_reader(NESTED_VCD.as_bytes()).unwrap();
        let catalog = loader.load_catalog().unwrap();

        let names: Vec<_> = catalog.names().collect();
        assert_eq!(vec!["top.core.alu.acc", "top.core.alu.gain"], names);
        assert_eq!(Some("10 ps".to_string()), loader.load_timescale());

        let acc = catalog.get("top.core.alu.acc").unwrap();
        let values: Vec<_> = loader.load_changes(acc).unwrap()
            .iter()
            .map(|c| (c.time, c.value.to_string()))
            .collect();
        assert_eq!(
            vec![
                (0, "0001".to_string()),
                (3, "010x".to_string()),
                (5, "zzzz".to_string()),
                (7, "1111".to_string()),
            ],
            values
        );

        let gain = catalog.get("top.core.alu.gain").unwrap();
        assert!(loader.load_changes(gain).unwrap().is_empty());

        let series = crate::trace::reconstruct(loader.load_changes(acc).unwrap(), 4, true).unwrap();
        assert_eq!(vec![Sample::new(0, 1), Sample::new(7, 1), Sample::new(7, -1)], series);
    }
}
