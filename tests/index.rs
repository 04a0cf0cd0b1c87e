extern crate ndframe;

use ndframe::{ArrayFactory, Error, Index, IndexBuilder, Key};

use std::ops::Bound;

fn keys(index: &Index) -> Vec<String>
{
    index.keys().map(|k| k.to_string()).collect()
}

#[test]
fn dense_upgrades_on_string_key()
{
    let index = Index::range(3);
    assert_eq!(format!("{:?}", index), "Index(dense) {Int(0): 0, Int(1): 1, Int(2): 2}");
    let mut builder = index.copy_builder();
    builder.set("x", 1).unwrap();
    let index = builder.build();
    assert!(format!("{:?}", index).starts_with("Index(hashed)"));
    assert_eq!(index.location("x").unwrap(), 1);
    assert_eq!(index.location(2).unwrap(), 2);
    assert_eq!(index.location(0).unwrap(), 0);
    assert_eq!(index.location(1), Err(Error::KeyNotFound(Key::Int(1))));
    assert_eq!(keys(&index), ["0", "x", "2"]);
}

#[test]
fn insertion_order_then_sorted()
{
    let index = Index::from_keys(["c", "a", "b"]).unwrap();
    assert_eq!(keys(&index), ["c", "a", "b"]);
    assert!(!index.is_sorted());

    let mut builder = index.copy_builder();
    builder.sort();
    let sorted = builder.build();
    assert!(sorted.is_sorted());
    assert_eq!(keys(&sorted), ["a", "b", "c"]);
    assert_eq!(sorted.location("a").unwrap(), 1);
    assert_eq!(sorted.location("z"), Err(Error::KeyNotFound(Key::from("z"))));
    assert_eq!(sorted.key(0).unwrap(), Key::from("c"));
    assert_eq!(sorted.to_string(), "{a: 1, b: 2, c: 0}");
}

#[test]
fn duplicates_rejected()
{
    assert_eq!(Index::from_keys([1, 2, 1]).err(), Some(Error::DuplicateKey(Key::Int(1))));
    let mut builder = IndexBuilder::new();
    builder.add("a").unwrap();
    assert!(matches!(builder.add("a"), Err(Error::DuplicateKey(_))));
    assert!(matches!(builder.set("a", 1), Err(Error::DuplicateKey(_))));
    assert_eq!(builder.len(), 1);
}

#[test]
fn positions_and_lookups()
{
    let index = Index::from_keys(["r0", "r1", "r2"]).unwrap();
    assert_eq!(index.locations(&["r2", "r0"]).unwrap(), vec![2, 0]);
    assert!(index.locations(&["r2", "nope"]).is_err());
    assert_eq!(index.key(3).err(), Some(Error::IndexOutOfRange { index: 3, len: 3 }));
    assert!(index.contains("r1"));
    assert!(!index.contains(1));
    let entries: Vec<(Key, usize)> = index.entries().rev().collect();
    assert_eq!(entries[0], (Key::from("r2"), 2));
    assert_eq!(index.keys().len(), 3);
}

#[test]
fn index_addresses_array_rows()
{
    let bj = ArrayFactory::new();
    let table = bj.from_rows(&[[1., 2.], [3., 4.], [5., 6.]]).unwrap();
    let rows = Index::from_keys(["x", "y", "z"]).unwrap();
    let cols = Index::from_keys(["lo", "hi"]).unwrap();
    let i = rows.location("y").unwrap();
    let j = cols.location("hi").unwrap();
    assert_eq!(table.get_ij(i, j).unwrap(), 4.);
    assert_eq!(rows.len(), table.rows());
    assert_eq!(cols.len(), table.columns());
}

#[test]
fn builder_mutations_keep_bijection()
{
    let mut builder = Index::range(4).copy_builder();
    builder.add(4).unwrap();
    builder.extend(7).unwrap();
    assert_eq!(builder.len(), 7);
    assert_eq!(builder.remove(2).unwrap(), Key::Int(2));
    assert_eq!(builder.location(3).unwrap(), 2);
    builder.swap(0, 1).unwrap();
    let index = builder.build();
    for (key, position) in index.entries() {
        assert_eq!(index.location(key.clone()).unwrap(), position);
        assert_eq!(index.key(position).unwrap(), key);
    }
    assert_eq!(keys(&index), ["1", "0", "3", "4", "5", "6"]);
}

#[test]
fn resize_truncates_and_grows()
{
    let mut builder = Index::from_keys(["a", "b", "c"]).unwrap().copy_builder();
    builder.resize(1).unwrap();
    assert_eq!(builder.len(), 1);
    assert!(!builder.contains("b"));
    builder.resize(3).unwrap();
    let index = builder.build();
    assert_eq!(keys(&index), ["a", "1", "2"]);
}

#[test]
fn custom_order()
{
    let mut builder = Index::from_keys([3, 1, 2]).unwrap().copy_builder();
    builder.sort_by(|a, b| b.cmp(a));
    let index = builder.build();
    assert_eq!(keys(&index), ["3", "2", "1"]);
    assert_eq!(index.location(1).unwrap(), 1);
    let upper = index.select_range(Key::from(3)..Key::from(1)).unwrap();
    assert_eq!(upper, vec![Key::from(3), Key::from(2)]);
}

#[test]
fn range_queries()
{
    let index = Index::from_keys([5, 1, 9, 3]).unwrap();
    let mid = index.select_range(Key::from(2)..=Key::from(5)).unwrap();
    assert_eq!(mid, vec![Key::from(5), Key::from(3)]);

    let sorted = Index::sorted([5, 1, 9, 3]).unwrap();
    let mid = sorted
        .select_range((Bound::Excluded(Key::from(1)), Bound::Unbounded))
        .unwrap();
    assert_eq!(mid, vec![Key::from(3), Key::from(5), Key::from(9)]);
    assert!(sorted.select_range(Key::from(9)..Key::from(1)).unwrap().is_empty());
    assert_eq!(
        sorted.select_range(Key::from(1)..Key::from("z")),
        Err(Error::IncomparableKeys(Key::from(1), Key::from("z")))
    );
    assert_eq!(sorted.select_range(..).unwrap().len(), 4);
}

#[test]
fn equality_by_entries()
{
    let a = Index::range(3);
    let b = Index::from_keys([0, 1, 2]).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, Index::from_keys([2, 1, 0]).unwrap());
    assert_eq!(Index::default().len(), 0);
    assert!(Index::default().is_empty());
}
