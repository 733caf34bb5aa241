use std::rc::Rc;

use calc_lang_interpreter::Object;

pub struct Printer {}

impl Printer {
    /// Errors are printed like any other value; Null results are skipped.
    pub fn print(&mut self, object: &Rc<Object>) {
        match object.as_ref() {
            Object::Null => {}
            object => println!("{}", object),
        }
    }
}
