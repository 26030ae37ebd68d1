use core::cell::Cell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

use rstest::rstest;

use simple_vec::{reserve, simple_vec, IndexError, SimpleVec, StorageError};

const SLICE: &[usize] = &[1, 2, 3, 4, 5];

/// An element which records how many instances have been dropped.
#[derive(Debug)]
struct Tracked {
    value: usize,
    drops: Rc<Cell<usize>>,
}

impl Tracked {
    fn new(value: usize, drops: &Rc<Cell<usize>>) -> Self {
        Self {
            value,
            drops: drops.clone(),
        }
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        Self::new(self.value, &self.drops)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.drops.set(self.drops.get() + 1);
    }
}

/// An element whose clone panics after a fixed number of successful clones.
#[derive(Debug)]
struct CloneBomb {
    remain: Rc<Cell<usize>>,
}

impl Clone for CloneBomb {
    fn clone(&self) -> Self {
        let remain = self.remain.get();
        if remain == 0 {
            panic!("clone bomb");
        }
        self.remain.set(remain - 1);
        Self {
            remain: self.remain.clone(),
        }
    }
}

#[test]
fn vec_new() {
    let v = SimpleVec::<usize>::new();
    assert_eq!(v.len(), 0);
    assert_eq!(v.capacity(), 0);
    assert!(v.is_empty());
}

#[test]
fn vec_const_default() {
    use const_default::ConstDefault;
    const EMPTY: SimpleVec<u32> = SimpleVec::DEFAULT;
    assert!(EMPTY.is_empty());
}

#[test]
fn vec_check_capacity_growth() {
    let mut res = [0usize; 10];
    let mut vec = SimpleVec::<usize>::new();
    for cap in res.iter_mut() {
        vec.push_back(1);
        *cap = vec.capacity();
    }
    assert_eq!(res, [1, 2, 4, 4, 8, 8, 8, 8, 16, 16]);
}

#[rstest]
#[case(1, 1)]
#[case(2, 2)]
#[case(5, 4)]
#[case(16, 5)]
#[case(17, 6)]
#[case(100, 8)]
fn vec_push_growth_count(#[case] count: usize, #[case] expect_growths: usize) {
    let mut vec = SimpleVec::new();
    let mut growths = 0;
    for value in 0..count {
        let prev = vec.capacity();
        vec.push_back(value);
        if vec.capacity() != prev {
            growths += 1;
        }
        assert!(vec.len() <= vec.capacity());
    }
    assert_eq!(growths, expect_growths);
    assert_eq!(vec.len(), count);
}

#[rstest]
#[case::empty(0)]
#[case::one(1)]
#[case::many(25)]
fn vec_with_len(#[case] len: usize) {
    let v = SimpleVec::<u64>::with_len(len);
    assert_eq!(v.len(), len);
    assert_eq!(v.capacity(), len);
    assert!(v.iter().all(|x| *x == 0));
}

#[test]
fn vec_with_len_strings() {
    let v = SimpleVec::<String>::with_len(3);
    assert_eq!(v, ["", "", ""]);
}

#[rstest]
#[case::empty(0)]
#[case::one(1)]
#[case::many(10)]
fn vec_from_elem(#[case] count: usize) {
    let v = SimpleVec::from_elem(String::from("x"), count);
    assert_eq!(v.len(), count);
    assert_eq!(v.capacity(), count);
    assert!(v.iter().all(|s| s == "x"));
}

#[test]
fn vec_from_slice() {
    let v = SimpleVec::<usize>::from_slice(SLICE);
    assert_eq!(v.capacity(), SLICE.len());
    assert_eq!(v.len(), SLICE.len());
    assert_eq!(v.as_slice(), SLICE);
}

#[test]
fn vec_from_array() {
    let v = SimpleVec::from([String::from("a"), String::from("b")]);
    assert_eq!(v.capacity(), 2);
    assert_eq!(v, ["a", "b"]);
}

#[test]
fn vec_macro() {
    let v: SimpleVec<u8> = simple_vec![];
    assert!(v.is_empty());
    let v = simple_vec![7u8; 3];
    assert_eq!(v, [7, 7, 7]);
    let v = simple_vec![1, 2, 3,];
    assert_eq!(v, [1, 2, 3]);
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(42)]
fn vec_reserve_hint(#[case] capacity: usize) {
    let v = SimpleVec::<String>::with_reserve(reserve(capacity));
    assert_eq!(v.len(), 0);
    assert_eq!(v.capacity(), capacity);
    let v = SimpleVec::<String>::from(reserve(capacity));
    assert_eq!(v.capacity(), capacity);
}

#[test]
fn vec_reserve_hint_then_push_no_realloc() {
    let mut v = SimpleVec::with_reserve(reserve(10));
    v.push_back(0usize);
    let ptr = v.as_ptr();
    for value in 1..10 {
        v.push_back(value);
    }
    assert_eq!(v.as_ptr(), ptr);
    assert_eq!(v.capacity(), 10);
}

#[test]
fn vec_scenario() {
    let mut v = SimpleVec::from([1, 2, 3]);
    assert_eq!((v.len(), v.capacity()), (3, 3));

    v.push_back(4);
    assert_eq!(v, [1, 2, 3, 4]);
    assert_eq!((v.len(), v.capacity()), (4, 6));

    let pos = v.insert(1, 99);
    assert_eq!(pos, 1);
    assert_eq!(v[pos], 99);
    assert_eq!(v, [1, 99, 2, 3, 4]);
    assert_eq!(v.len(), 5);

    let pos = v.erase(0);
    assert_eq!(pos, 0);
    assert_eq!(v, [99, 2, 3, 4]);
    assert_eq!(v.len(), 4);

    let err: IndexError = v.at(10).unwrap_err();
    assert_eq!((err.index(), err.length()), (10, 4));
    assert_eq!(err.as_str(), "index out of bounds");

    v.resize(2);
    assert_eq!(v, [99, 2]);
    assert_eq!(v.capacity(), 6);

    v.resize(6);
    assert_eq!(v, [99, 2, 0, 0, 0, 0]);
    assert_eq!(v.capacity(), 6);
}

#[test]
fn vec_at() {
    let mut v = SimpleVec::from_slice(SLICE);
    assert_eq!(v.at(0), Ok(&1));
    assert_eq!(v.at(4), Ok(&5));
    *v.at_mut(4).unwrap() = 50;
    assert_eq!(v[4], 50);
    assert!(v.at_mut(5).is_err());
    let empty = SimpleVec::<u8>::new();
    assert!(empty.at(0).is_err());
}

#[test]
fn vec_unchecked_access() {
    let v = SimpleVec::from_slice(SLICE);
    assert_eq!(unsafe { *v.get_unchecked(2) }, 3);
}

#[test]
fn vec_resize_grow_beyond_double() {
    let mut v = SimpleVec::from([1u32, 2]);
    v.resize(9);
    assert_eq!(v.capacity(), 9);
    assert_eq!(v, [1, 2, 0, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn vec_resize_grow_double() {
    let mut v = SimpleVec::from([1u32, 2, 3, 4]);
    v.resize(5);
    assert_eq!(v.capacity(), 8);
    assert_eq!(v, [1, 2, 3, 4, 0]);
}

#[test]
fn vec_resize_with() {
    let mut v = SimpleVec::<usize>::new();
    let mut next = 0;
    v.resize_with(4, || {
        next += 1;
        next
    });
    assert_eq!(v, [1, 2, 3, 4]);
}

#[test]
fn vec_resize_shrink_drops_tail() {
    let drops = Rc::new(Cell::new(0));
    let mut v = SimpleVec::from_elem(Tracked::new(1, &drops), 5);
    v.resize_with(2, || unreachable!());
    assert_eq!(drops.get(), 3);
    assert_eq!(v.capacity(), 5);
    drop(v);
    assert_eq!(drops.get(), 5);
}

#[test]
fn vec_push_pop_round_trip() {
    let mut v = SimpleVec::from_slice(SLICE);
    let before = v.clone();
    v.push_back(6);
    let cap = v.capacity();
    assert_eq!(v.pop_back(), Some(6));
    assert_eq!(v, before);
    assert_eq!(v.capacity(), cap);
}

#[test]
fn vec_pop_empty() {
    let mut v = SimpleVec::<u8>::new();
    assert_eq!(v.pop_back(), None);
    assert_eq!(v.len(), 0);
}

#[rstest]
#[case::front(0)]
#[case::middle(2)]
#[case::back(5)]
fn vec_insert_erase_round_trip(#[case] index: usize) {
    let mut v = SimpleVec::from_slice(SLICE);
    let pos = v.insert(index, 100);
    assert_eq!(v[pos], 100);
    assert_eq!(v.len(), SLICE.len() + 1);
    let pos = v.erase(pos);
    assert_eq!(pos, index);
    assert_eq!(v.as_slice(), SLICE);
}

#[test]
fn vec_erase_last_returns_end() {
    let mut v = SimpleVec::from_slice(SLICE);
    let pos = v.erase(4);
    assert_eq!(pos, v.len());
}

#[test]
fn vec_erase_keeps_capacity() {
    let mut v = SimpleVec::from_slice(SLICE);
    let ptr = v.as_ptr();
    v.erase(1);
    v.erase(1);
    assert_eq!(v, [1, 4, 5]);
    assert_eq!(v.capacity(), 5);
    assert_eq!(v.as_ptr(), ptr);
}

#[test]
fn vec_remove() {
    let mut v = SimpleVec::from([String::from("a"), String::from("b")]);
    assert_eq!(v.remove(0), "a");
    assert_eq!(v, ["b"]);
}

#[test]
#[should_panic(expected = "index out of bounds")]
fn vec_insert_out_of_range() {
    let mut v = SimpleVec::from_slice(SLICE);
    v.insert(6, 0);
}

#[test]
#[should_panic(expected = "index out of bounds")]
fn vec_erase_out_of_range() {
    let mut v = SimpleVec::from_slice(SLICE);
    v.erase(5);
}

#[test]
fn vec_reserve() {
    let mut v = SimpleVec::from_slice(SLICE);
    let ptr = v.as_ptr();
    v.reserve(3);
    assert_eq!(v.capacity(), 5);
    assert_eq!(v.as_ptr(), ptr);
    v.reserve(5);
    assert_eq!(v.capacity(), 5);
    v.reserve(12);
    assert_eq!(v.capacity(), 12);
    assert_eq!(v.as_slice(), SLICE);
}

#[test]
fn vec_try_reserve_overflow_unchanged() {
    let mut v = SimpleVec::<u64>::from([1, 2, 3]);
    let ptr = v.as_ptr();
    assert!(matches!(
        v.try_reserve(usize::MAX),
        Err(StorageError::LayoutError(_))
    ));
    assert_eq!(v, [1, 2, 3]);
    assert_eq!(v.capacity(), 3);
    assert_eq!(v.as_ptr(), ptr);
}

#[test]
fn vec_try_resize_overflow_unchanged() {
    let mut v = SimpleVec::<u64>::from([1, 2, 3]);
    assert!(v.try_resize(usize::MAX).is_err());
    assert_eq!(v, [1, 2, 3]);
    assert_eq!(v.capacity(), 3);
}

#[test]
fn vec_clone_independent() {
    let mut v = SimpleVec::with_capacity(10);
    v.push_back(String::from("a"));
    v.push_back(String::from("b"));
    let mut c = v.clone();
    assert_eq!(c, v);
    assert_eq!(c.capacity(), 2);
    c[0].push('!');
    c.push_back(String::from("c"));
    assert_eq!(v, ["a", "b"]);
    assert_eq!(c, ["a!", "b", "c"]);
}

#[test]
fn vec_clone_from() {
    let mut target = SimpleVec::from([9u8; 16]);
    let source = SimpleVec::from([1u8, 2]);
    target.clone_from(&source);
    assert_eq!(target, source);
    assert_eq!(target.capacity(), 2);
}

#[test]
fn vec_clone_panic_no_leak() {
    let remain = Rc::new(Cell::new(usize::MAX));
    let bomb = CloneBomb {
        remain: remain.clone(),
    };
    let mut target = SimpleVec::from_elem(bomb.clone(), 1);
    let source = SimpleVec::from_elem(bomb, 3);
    assert_eq!(Rc::strong_count(&remain), 5);
    // the second clone of the copy-and-swap will panic
    remain.set(1);
    let result = catch_unwind(AssertUnwindSafe(|| target.clone_from(&source)));
    assert!(result.is_err());
    assert_eq!(target.len(), 1);
    assert_eq!(target.capacity(), 1);
    assert_eq!(Rc::strong_count(&remain), 5);
    drop((target, source));
    assert_eq!(Rc::strong_count(&remain), 1);
}

#[test]
fn vec_take() {
    let mut v = SimpleVec::from_slice(SLICE);
    let m = v.take();
    assert_eq!(v.len(), 0);
    assert_eq!(v.capacity(), 0);
    assert_eq!(m.as_slice(), SLICE);
    let t = core::mem::take(&mut v);
    assert!(t.is_empty());
}

#[test]
fn vec_move_assign() {
    let drops = Rc::new(Cell::new(0));
    let mut target = SimpleVec::from_elem(Tracked::new(0, &drops), 2);
    let mut source = SimpleVec::from_elem(Tracked::new(1, &drops), 3);
    assert_eq!(target.len(), 2);
    target = source.take();
    assert_eq!(drops.get(), 2);
    assert_eq!(target.len(), 3);
    assert_eq!((source.len(), source.capacity()), (0, 0));
}

#[test]
fn vec_swap() {
    let mut a = SimpleVec::from([1, 2, 3]);
    let mut b = SimpleVec::with_capacity(10);
    b.push_back(9);
    let (pa, pb) = (a.as_ptr(), b.as_ptr());
    a.swap(&mut b);
    assert_eq!(a, [9]);
    assert_eq!(a.capacity(), 10);
    assert_eq!(a.as_ptr(), pb);
    assert_eq!(b, [1, 2, 3]);
    assert_eq!(b.capacity(), 3);
    assert_eq!(b.as_ptr(), pa);
}

#[test]
fn vec_drops_each_element_once() {
    let drops = Rc::new(Cell::new(0));
    let mut v = SimpleVec::new();
    for value in 0..20 {
        v.insert(value / 2, Tracked::new(value, &drops));
    }
    assert_eq!(drops.get(), 0);
    v.erase(3);
    assert_eq!(drops.get(), 1);
    let popped = v.pop_back();
    assert!(popped.is_some());
    drop(popped);
    assert_eq!(drops.get(), 2);
    v.clear();
    assert_eq!(drops.get(), 20);
    assert!(v.capacity() >= 20);
}

#[test]
fn vec_into_iter() {
    let drops = Rc::new(Cell::new(0));
    let v = SimpleVec::from([
        Tracked::new(1, &drops),
        Tracked::new(2, &drops),
        Tracked::new(3, &drops),
        Tracked::new(4, &drops),
    ]);
    let mut iter = v.into_iter();
    assert_eq!(iter.len(), 4);
    assert_eq!(iter.next().map(|t| t.value), Some(1));
    assert_eq!(iter.next_back().map(|t| t.value), Some(4));
    assert_eq!(iter.as_slice().len(), 2);
    assert_eq!(drops.get(), 2);
    drop(iter);
    assert_eq!(drops.get(), 4);
}

#[test]
fn vec_iter_refs() {
    let mut v = SimpleVec::from_slice(SLICE);
    for item in &mut v {
        *item *= 2;
    }
    let total: usize = (&v).into_iter().sum();
    assert_eq!(total, 30);
}

#[test]
fn vec_compare() {
    let a = SimpleVec::from([1, 2, 3]);
    let b = SimpleVec::from([1, 2, 4]);
    let c = SimpleVec::from([1, 2]);
    assert!(a != b);
    assert!(a < b);
    assert!(b > a);
    assert!(a <= a.clone());
    assert!(a >= a.clone());
    assert!(c < a);
    assert!(c != a);
    assert!(SimpleVec::<i32>::new() < c);
    assert_eq!(a.cmp(&b), core::cmp::Ordering::Less);
    assert_eq!(a, vec![1, 2, 3]);
    assert_eq!(a, &[1, 2, 3][..]);
}

#[test]
fn vec_zst() {
    #[derive(Debug, Default, Clone, PartialEq)]
    struct Zst;
    let mut v = SimpleVec::new();
    for _ in 0..10 {
        v.push_back(Zst);
    }
    v.insert(3, Zst);
    assert_eq!(v.len(), 11);
    v.erase(0);
    v.resize(20);
    assert_eq!(v.len(), 20);
    assert_eq!(v.pop_back(), Some(Zst));
}
