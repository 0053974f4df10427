use quickcheck::{Arbitrary, Gen};

use crate::{Map, Node, Number, Sign, Value};

fn digits(g: &mut Gen, first_nonzero: bool, max_len: usize) -> String {
    let len = 1 + usize::arbitrary(g) % max_len;
    (0..len)
        .map(|i| {
            let lo = u8::from(i == 0 && first_nonzero);
            char::from(b'0' + lo + u8::arbitrary(g) % (10 - lo))
        })
        .collect()
}

impl Arbitrary for Sign {
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) { Sign::Plus } else { Sign::Minus }
    }
}

impl Arbitrary for Number {
    fn arbitrary(g: &mut Gen) -> Self {
        let major = if usize::arbitrary(g) % 4 == 0 {
            "0".into()
        } else {
            digits(g, true, 8)
        };
        let minor = if bool::arbitrary(g) {
            digits(g, false, 6)
        } else {
            String::new()
        };
        let (exp_sign, exp) = if bool::arbitrary(g) {
            (Option::<Sign>::arbitrary(g), digits(g, false, 2))
        } else {
            (None, String::new())
        };
        Number {
            negative: bool::arbitrary(g),
            major,
            minor,
            exp_sign,
            exp,
        }
    }
}

fn symbol(g: &mut Gen) -> Node {
    Node::symbol(*g.choose(&["true", "false", "null"]).unwrap_or(&"null"))
}

fn gen_value(g: &mut Gen, depth: usize) -> Node {
    let choices = if depth == 0 { 3 } else { 5 };
    match usize::arbitrary(g) % choices {
        0 => symbol(g),
        1 => Node::number(Number::arbitrary(g)),
        2 => Node::string(String::arbitrary(g)),
        3 => {
            let len = usize::arbitrary(g) % 4;
            Node::from((0..len).map(|_| gen_value(g, depth - 1)).collect::<Vec<_>>())
        }
        _ => gen_object(g, depth - 1),
    }
}

fn gen_object(g: &mut Gen, depth: usize) -> Node {
    let len = usize::arbitrary(g) % 4;
    let map: Map = (0..len)
        .map(|_| (String::arbitrary(g), gen_value(g, depth)))
        .collect();
    Node::from(map)
}

/// A well-formed tree whose root is an object, as every document is.
#[derive(Clone, Debug)]
pub(crate) struct WellFormed(pub(crate) Node);

impl Arbitrary for WellFormed {
    fn arbitrary(g: &mut Gen) -> Self {
        let depth = usize::arbitrary(g) % 4;
        WellFormed(gen_object(g, depth))
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let Value::Object(map) = self.0.value() else {
            return quickcheck::empty_shrinker();
        };
        let map = map.clone();
        Box::new((0..map.len()).map(move |skip| {
            let smaller: Map = map
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != skip)
                .map(|(_, (k, v))| (k.clone(), v.clone()))
                .collect();
            WellFormed(Node::from(smaller))
        }))
    }
}
