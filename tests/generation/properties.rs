//! Behavioural properties of compiled patterns.

use pattern_generator::{
    compile, optimize, CountingSources, Environment, EntropySources, Generator, SeededSources,
};

fn counting(pattern: &str) -> Generator {
    compile(pattern, &Environment::new(), &mut CountingSources).expect("pattern should compile")
}

fn outputs(generator: &Generator, n: usize) -> Vec<String> {
    (0..n).map(|_| generator.generate()).collect()
}

#[test]
fn test_plain_literals_reproduce_pattern_text() {
    for pattern in ["", "hello world", "a.b*c+d?", "tab\there", "ünïcødé", "x-y_z"] {
        let with_counter = counting(pattern);
        let with_entropy = compile(pattern, &Environment::new(), &mut EntropySources).unwrap();
        assert_eq!(with_counter.generate(), pattern);
        assert_eq!(with_entropy.generate(), pattern);
    }
}

#[test]
fn test_escapes_reproduce_specials() {
    let generator = counting(r"\$5 \(approx\) \[x\] a\|b");
    assert_eq!(generator.generate(), "$5 (approx) [x] a|b");
}

#[test]
fn test_char_class_cycles_through_members() {
    let generator = counting("[abc]");
    assert_eq!(outputs(&generator, 6), vec!["a", "b", "c", "a", "b", "c"]);
}

#[test]
fn test_range_equals_listing() {
    assert_eq!(outputs(&counting("[a-e]"), 10), outputs(&counting("[abcde]"), 10));
}

#[test]
fn test_reversed_range_yields_nothing() {
    let generator = counting("[c-a]");
    assert_eq!(outputs(&generator, 3), vec!["", "", ""]);

    let generator = counting("[c-az]");
    assert_eq!(outputs(&generator, 2), vec!["z", "z"]);
}

#[test]
fn test_branch_selected_by_draw_modulo_count() {
    let generator = counting("abc|def");
    assert_eq!(outputs(&generator, 2), vec!["abc", "def"]);

    let generator = counting("0|1|2|3");
    assert_eq!(outputs(&generator, 6), vec!["0", "1", "2", "3", "0", "1"]);
}

#[test]
fn test_exact_and_ranged_repetition() {
    let exact = counting("ab{3}");
    assert_eq!(outputs(&exact, 3), vec!["ababab"; 3]);

    let ranged = counting("z{2,4}");
    let lengths: Vec<usize> = outputs(&ranged, 5).iter().map(String::len).collect();
    assert_eq!(lengths, vec![2, 3, 4, 2, 3]);
}

#[test]
fn test_nested_group_draw_order() {
    let generator = counting("abc(def|[ghi])jkl");
    assert_eq!(
        outputs(&generator, 4),
        vec!["abcdefjkl", "abcgjkl", "abcdefjkl", "abchjkl"]
    );
}

#[test]
fn test_forward_and_undefined_references() {
    let environment = Environment::new();
    let early = compile("<$X>", &environment, &mut CountingSources).unwrap();
    let undefined = compile("<$Y>", &environment, &mut CountingSources).unwrap();
    let in_class = compile("[$X]", &environment, &mut CountingSources).unwrap();

    environment.define("X", compile("abc", &environment, &mut CountingSources).unwrap());

    assert_eq!(early.generate(), "<abc>");
    assert_eq!(undefined.generate(), "<>");
    // `$` has no meaning inside a class
    assert_eq!(outputs(&in_class, 2), vec!["$", "X"]);
}

#[test]
fn test_optimize_is_idempotent_and_preserves_output() {
    let pattern = "pre{0}(a|b[]|c{0,0})[]x{1,2}";

    let reference = counting(pattern);
    let mut once = counting(pattern);
    optimize(&mut once);
    let rendered = once.to_string();
    optimize(&mut once);

    assert_eq!(once.to_string(), rendered);
    assert!(once.node_count() < reference.node_count());
    assert_eq!(outputs(&once, 8), outputs(&reference, 8));
}

#[test]
fn test_seeded_sources_are_reproducible() {
    let pattern = "[a-z]{4,8}(-[0-9]{2}|)";
    let a = compile(pattern, &Environment::new(), &mut SeededSources::new(1234)).unwrap();
    let b = compile(pattern, &Environment::new(), &mut SeededSources::new(1234)).unwrap();
    assert_eq!(outputs(&a, 20), outputs(&b, 20));
}

#[test]
fn test_seeded_output_stays_within_pattern() {
    let generator = compile(
        "[a-z]{4,8}(-[0-9]{2}|)",
        &Environment::new(),
        &mut SeededSources::new(99),
    )
    .unwrap();

    for value in outputs(&generator, 200) {
        let (word, suffix) = value.split_once('-').unwrap_or((value.as_str(), ""));
        assert!((4..=8).contains(&word.len()), "bad word in {value:?}");
        assert!(word.chars().all(|c| c.is_ascii_lowercase()), "bad word in {value:?}");
        assert!(
            suffix.is_empty() || (suffix.len() == 2 && suffix.chars().all(|c| c.is_ascii_digit())),
            "bad suffix in {value:?}"
        );
    }
}
