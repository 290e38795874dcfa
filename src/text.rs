use core::fmt::{Debug, Display, Formatter};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{OnceLock, RwLock};

type TextIndex = u32;

/// An interned symbol name. Equality and hashing are by index, so comparing
/// two names never touches the string table.
#[derive(Hash, Eq, PartialEq, Clone, Copy)]
pub struct Text(TextIndex);

#[derive(Default)]
struct TextMap {
    val_to_idx: HashMap<&'static str, TextIndex>,
    idx_to_val: Vec<&'static str>,
}

impl TextMap {
    fn insert_str(&mut self, val: &str) -> TextIndex {
        if let Some(&idx) = self.val_to_idx.get(val) {
            idx
        } else {
            let idx = self.idx_to_val.len() as TextIndex;
            // interned names live for the rest of the process
            let val: &'static str = Box::leak(val.to_owned().into_boxed_str());
            self.val_to_idx.insert(val, idx);
            self.idx_to_val.push(val);
            idx
        }
    }
    fn get_str(&self, idx: TextIndex) -> &'static str {
        self.idx_to_val[idx as usize]
    }
}

static TEXT_MAP: OnceLock<RwLock<TextMap>> = OnceLock::new();

fn text_map() -> &'static RwLock<TextMap> {
    TEXT_MAP.get_or_init(Default::default)
}

impl Text {
    pub fn from_str(s: &str) -> Self {
        let known = text_map().read().unwrap_or_else(|e| e.into_inner()).val_to_idx.get(s).copied();
        if let Some(idx) = known {
            return Self(idx);
        }
        let map: &mut TextMap = &mut text_map().write().unwrap_or_else(|e| e.into_inner());
        Self(map.insert_str(s))
    }
    pub fn as_str(&self) -> &'static str {
        text_map().read().unwrap_or_else(|e| e.into_inner()).get_str(self.0)
    }
}

// order by content so that sorted output is alphabetical, not by interning time
impl PartialOrd for Text {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Text {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        if self.0 == other.0 {
            return core::cmp::Ordering::Equal;
        }
        self.as_str().cmp(other.as_str())
    }
}

impl Debug for Text {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
impl Display for Text {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/////////////////////

static FRESH_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Prefix of the names handed out by [`fresh_variable`]. Inputs to the
/// elimination procedures may not use names of this shape.
pub const FRESH_PREFIX: char = 'z';

/// Draws the next name from the process-wide fresh variable source:
/// `z1`, `z2`, ... Names are never handed out twice.
pub fn fresh_variable() -> Text {
    let n = FRESH_COUNTER.fetch_add(1, Ordering::Relaxed) + 1;
    Text::from_str(&format!("{FRESH_PREFIX}{n}"))
}

/// Whether `name` has the shape of a fresh variable name (`z` and a number).
pub fn is_fresh_shaped(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next() == Some(FRESH_PREFIX)
        && name.len() > 1
        && chars.all(|c| c.is_ascii_digit())
}
