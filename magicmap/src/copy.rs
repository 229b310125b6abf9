//! Deep copying of value graphs.

use std::collections::{HashMap, VecDeque};

use crate::map::MagicMap;
use crate::value::{List, PlainMap, Tuple, Value};

enum Job {
    Magic { src: MagicMap, dst: MagicMap },
    Plain { src: PlainMap, dst: PlainMap },
    List { src: List, dst: List },
}

/// Structurally identical graph sharing no storage with the original.
///
/// Sharing and cycles inside the input reappear in the copy, and
/// placeholder maps keep their origin, so a copied placeholder is still
/// protected (and still reports the same sentinel flag).
pub(crate) fn deep_copy_value(value: &Value) -> Value {
    let mut memo = HashMap::new();
    let mut queue = VecDeque::new();
    let out = shallow(value, &mut memo, &mut queue);
    while let Some(job) = queue.pop_front() {
        match job {
            Job::Magic { src, dst } => {
                for (key, value) in src.entries() {
                    let copied = shallow(&value, &mut memo, &mut queue);
                    dst.insert_raw(key, copied);
                }
            }
            Job::Plain { src, dst } => {
                for (key, value) in src.entries() {
                    let copied = shallow(&value, &mut memo, &mut queue);
                    dst.insert(key, copied);
                }
            }
            Job::List { src, dst } => {
                for elem in src.to_vec() {
                    let copied = shallow(&elem, &mut memo, &mut queue);
                    dst.push(copied);
                }
            }
        }
    }
    out
}

fn shallow(value: &Value, memo: &mut HashMap<usize, Value>, queue: &mut VecDeque<Job>) -> Value {
    match value {
        Value::Magic(src) => {
            if let Some(done) = memo.get(&src.ptr_id()) {
                return done.clone();
            }
            let dst = MagicMap::with_origin(src.origin());
            memo.insert(src.ptr_id(), Value::Magic(dst.clone()));
            queue.push_back(Job::Magic {
                src: src.clone(),
                dst: dst.clone(),
            });
            Value::Magic(dst)
        }
        Value::Map(src) => {
            if let Some(done) = memo.get(&src.ptr_id()) {
                return done.clone();
            }
            let dst = PlainMap::new();
            memo.insert(src.ptr_id(), Value::Map(dst.clone()));
            queue.push_back(Job::Plain {
                src: src.clone(),
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
                src: src.clone(),
                dst: dst.clone(),
            });
            Value::List(dst)
        }
        Value::Tuple(tuple) => {
            let items: Vec<Value> = tuple
                .items()
                .iter()
                .map(|item| shallow(item, memo, queue))
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
            let out = Value::Set(set.rebuilt());
            memo.insert(set.ptr_id(), out.clone());
            out
        }
        scalar => scalar.clone(),
    }
}
