//! `/cerino`: pick one of the given words at random.

use rand::{seq::SliceRandom, Rng};

use super::Reply;

pub const COMMAND: &str = "/cerino";

const DESCRIPTION: &str = "Return a random element from a set";

const USAGE: &str = "Commands:
- `/cerino help`
shows this help
- `/cerino X Y Z ...`
return one random element from those passed
";

/// Answer one `/cerino` invocation with the thread-local generator.
pub fn pick(raw_text: &str) -> Reply {
    pick_with(raw_text, &mut rand::thread_rng())
}

/// Same as `pick`, drawing from `rng`. Fewer than two candidates, or a
/// leading `help`, yields the usage text.
pub fn pick_with<R: Rng + ?Sized>(raw_text: &str, rng: &mut R) -> Reply {
    let tokens: Vec<&str> = raw_text.split(' ').collect();
    if tokens.len() < 2 || tokens[0] == "help" {
        return Reply::with_usage(DESCRIPTION, USAGE);
    }

    match tokens.choose(rng) {
        Some(selected) => Reply::public(format!(
            "Out of the following candidates: {}\nCerinoBot has selected: {selected}",
            tokens.join(",")
        )),
        None => Reply::with_usage(DESCRIPTION, USAGE),
    }
}
