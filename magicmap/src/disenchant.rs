//! The disenchant engine: converting wrapped mapping graphs back into
//! plain ones.
//!
//! The mirror image of hooking, with one deliberate asymmetry: where
//! hooking rewrites lists in place, disenchanting builds *fresh*
//! containers throughout, so the plain graph it returns shares no mutable
//! storage with the wrapped original. Sharing and cycles inside the input
//! are still reproduced in the output through the same identity memo.

use std::collections::{HashMap, VecDeque};

use crate::map::MagicMap;
use crate::value::{List, PlainMap, Tuple, Value};

enum Job {
    Map { src: MagicMap, dst: PlainMap },
    Plain { src: PlainMap, dst: PlainMap },
    List { src: List, dst: List },
}

/// Recursively converts every wrapped map reachable from `value` into a
/// plain map.
///
/// Wrapped maps, plain maps and lists all come back as new containers;
/// tuples are rebuilt keeping their field names; sets come back as fresh
/// sets with their frozen flag intact; scalars pass through. A node
/// reached twice converts once, and cycles terminate.
#[must_use]
pub fn disenchant(value: Value) -> Value {
    let mut memo = HashMap::new();
    let mut queue = VecDeque::new();
    let mut maps = 0usize;
    let out = shallow(value, &mut memo, &mut queue, &mut maps);
    drain(&mut memo, &mut queue, &mut maps);
    if maps > 0 {
        log::trace!("disenchanted {maps} map(s)");
    }
    out
}

fn shallow(
    value: Value,
    memo: &mut HashMap<usize, Value>,
    queue: &mut VecDeque<Job>,
    maps: &mut usize,
) -> Value {
    match value {
        Value::Magic(src) => {
            if let Some(done) = memo.get(&src.ptr_id()) {
                return done.clone();
            }
            let dst = PlainMap::new();
            memo.insert(src.ptr_id(), Value::Map(dst.clone()));
            *maps += 1;
            queue.push_back(Job::Map {
                src,
                dst: dst.clone(),
            });
            Value::Map(dst)
        }
        Value::Map(src) => {
            if let Some(done) = memo.get(&src.ptr_id()) {
                return done.clone();
            }
            let dst = PlainMap::new();
            memo.insert(src.ptr_id(), Value::Map(dst.clone()));
            queue.push_back(Job::Plain {
                src,
                dst: dst.clone(),
            });
            Value::Map(dst)
        }
        Value::List(src) => {
            if let Some(done) = memo.get(&src.ptr_id()) {
                return done.clone();
            }
            let dst = List::new();
            memo.insert(src.ptr_id(), Value::List(dst.clone()));
            queue.push_back(Job::List {
                src,
                dst: dst.clone(),
            });
            Value::List(dst)
        }
        Value::Tuple(tuple) => {
            let items: Vec<Value> = tuple
                .items()
                .iter()
                .map(|item| shallow(item.clone(), memo, queue, maps))
                .collect();
            Value::Tuple(match tuple.fields_rc() {
                Some(fields) => Tuple {
                    fields: Some(fields),
                    items: items.into(),
                },
                None => Tuple::new(items),
            })
        }
        Value::Set(set) => {
            if let Some(done) = memo.get(&set.ptr_id()) {
                return done.clone();
            }
            let fresh = set.rebuilt();
            let out = Value::Set(fresh);
            memo.insert(set.ptr_id(), out.clone());
            out
        }
        scalar => scalar,
    }
}

fn drain(memo: &mut HashMap<usize, Value>, queue: &mut VecDeque<Job>, maps: &mut usize) {
    while let Some(job) = queue.pop_front() {
        match job {
            Job::Map { src, dst } => {
                for (key, value) in src.entries() {
                    let converted = shallow(value, memo, queue, maps);
                    dst.insert(key, converted);
                }
            }
            Job::Plain { src, dst } => {
                for (key, value) in src.entries() {
                    let converted = shallow(value, memo, queue, maps);
                    dst.insert(key, converted);
                }
            }
            Job::List { src, dst } => {
                for elem in src.to_vec() {
                    let converted = shallow(elem, memo, queue, maps);
                    dst.push(converted);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hook::hook;

    #[test]
    fn round_trip_restores_plain_shape() {
        let plain = PlainMap::new();
        plain.insert("name", "Alice");
        let inner = PlainMap::new();
        inner.insert("city", "Berlin");
        plain.insert("address", Value::Map(inner));

        let hooked = hook(Value::Map(plain.clone()));
        let back = disenchant(hooked);
        let back = back.as_map().unwrap();
        assert_eq!(back.get("name"), Some(Value::from("Alice")));
        assert!(back.get("address").unwrap().as_map().is_some());
        assert_eq!(Value::Map(back.clone()), Value::Map(plain));
    }

    #[test]
    fn output_shares_no_storage_with_input() {
        let map = MagicMap::from_pairs([("xs", Value::from(vec![Value::Int(1)]))]);
        let list_before = map.get("xs").unwrap().as_list().unwrap().clone();

        let plain = disenchant(Value::Magic(map));
        let list_after = plain
            .as_map()
            .unwrap()
            .get("xs")
            .unwrap()
            .as_list()
            .unwrap()
            .clone();
        assert_ne!(list_before.ptr_id(), list_after.ptr_id());

        list_after.push(Value::Int(2));
        assert_eq!(list_before.len(), 1);
    }

    #[test]
    fn cycles_survive() {
        let map = MagicMap::new();
        map.insert("me", map.clone()).unwrap();

        let plain = disenchant(Value::Magic(map));
        let plain = plain.as_map().unwrap();
        let me = plain.get("me").unwrap().as_map().unwrap().clone();
        assert_eq!(me.ptr_id(), plain.ptr_id());
    }

    #[test]
    fn frozen_sets_stay_frozen() {
        use crate::key::Key;
        let set = crate::value::Set::frozen([Key::from("a")]);
        let out = disenchant(Value::Set(set));
        assert!(out.as_set().unwrap().is_frozen());
    }
}
