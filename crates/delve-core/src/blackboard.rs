use std::borrow::Cow;
use std::collections::BTreeMap;
use std::marker::PhantomData;

use crate::{Cell, EntityId, MoveAction};

/// Payload stored under a blackboard key.
#[derive(Debug, Clone, PartialEq)]
pub enum BbValue {
    Cell(Cell),
    Path(Vec<MoveAction>),
    Entity(EntityId),
    Number(f64),
    Flag(bool),
}

impl BbValue {
    pub fn kind(&self) -> &'static str {
        match self {
            BbValue::Cell(_) => "cell",
            BbValue::Path(_) => "path",
            BbValue::Entity(_) => "entity",
            BbValue::Number(_) => "number",
            BbValue::Flag(_) => "flag",
        }
    }
}

/// Rust types that map onto exactly one [`BbValue`] variant.
pub trait BbType: Sized + 'static {
    const KIND: &'static str;

    fn into_value(self) -> BbValue;
    fn from_ref(value: &BbValue) -> Option<&Self>;
    fn from_mut(value: &mut BbValue) -> Option<&mut Self>;
    fn from_value(value: BbValue) -> Option<Self>;
}

macro_rules! bb_type {
    ($ty:ty, $variant:ident, $kind:literal) => {
        impl BbType for $ty {
            const KIND: &'static str = $kind;

            fn into_value(self) -> BbValue {
                BbValue::$variant(self)
            }

            fn from_ref(value: &BbValue) -> Option<&Self> {
                match value {
                    BbValue::$variant(v) => Some(v),
                    _ => None,
                }
            }

            fn from_mut(value: &mut BbValue) -> Option<&mut Self> {
                match value {
                    BbValue::$variant(v) => Some(v),
                    _ => None,
                }
            }

            fn from_value(value: BbValue) -> Option<Self> {
                match value {
                    BbValue::$variant(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

bb_type!(Cell, Cell, "cell");
bb_type!(Vec<MoveAction>, Path, "path");
bb_type!(EntityId, Entity, "entity");
bb_type!(f64, Number, "number");
bb_type!(bool, Flag, "flag");

/// Typed name for a blackboard slot.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BbKey<T: BbType> {
    name: &'static str,
    _phantom: PhantomData<fn() -> T>,
}

impl<T: BbType> Copy for BbKey<T> {}

impl<T: BbType> Clone for BbKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: BbType> BbKey<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _phantom: PhantomData,
        }
    }

    pub fn name(self) -> &'static str {
        self.name
    }
}

/// Per-agent scratch memory shared by the steps of a script across ticks.
///
/// Reading a key with a different type than the one stored is a programming error and panics.
#[derive(Debug, Default, Clone)]
pub struct Blackboard {
    values: BTreeMap<Cow<'static, str>, BbValue>,
}

fn mismatch(name: &str, expected: &str, found: &BbValue) -> ! {
    panic!(
        "blackboard type mismatch for key `{name}` (expected {expected}, stored {})",
        found.kind()
    )
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains<T: BbType>(&self, key: BbKey<T>) -> bool {
        self.values.contains_key(key.name)
    }

    pub fn set<T: BbType>(&mut self, key: BbKey<T>, value: T) {
        self.values
            .insert(Cow::Borrowed(key.name), value.into_value());
    }

    pub fn get<T: BbType>(&self, key: BbKey<T>) -> Option<&T> {
        let value = self.values.get(key.name)?;
        match T::from_ref(value) {
            Some(v) => Some(v),
            None => mismatch(key.name, T::KIND, value),
        }
    }

    pub fn get_mut<T: BbType>(&mut self, key: BbKey<T>) -> Option<&mut T> {
        let value = self.values.get_mut(key.name)?;
        if T::from_ref(value).is_none() {
            mismatch(key.name, T::KIND, value);
        }
        T::from_mut(value)
    }

    pub fn remove<T: BbType>(&mut self, key: BbKey<T>) -> Option<T> {
        let value = self.values.remove(key.name)?;
        if T::from_ref(&value).is_none() {
            mismatch(key.name, T::KIND, &value);
        }
        T::from_value(value)
    }

    /// Untyped access by string key, for tooling and dynamically named slots.
    pub fn value(&self, name: &str) -> Option<&BbValue> {
        self.values.get(name)
    }

    pub fn insert_value(&mut self, name: impl Into<Cow<'static, str>>, value: BbValue) {
        self.values.insert(name.into(), value);
    }

    pub fn erase(&mut self, name: &str) -> Option<BbValue> {
        self.values.remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BbValue)> {
        self.values.iter().map(|(k, v)| (k.as_ref(), v))
    }
}
