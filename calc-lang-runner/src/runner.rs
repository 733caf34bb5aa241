use calc_lang_interpreter::{Evaluator, Object};

/// Evaluates `source` one line at a time in a single session, printing every
/// non-Null result.
pub fn execute(source: &str) {
    let mut evaluator = Evaluator::new();

    for line in source.lines() {
        let result = evaluator.evaluate(line);
        if *result != Object::Null {
            println!("{}", result);
        }
    }
}
