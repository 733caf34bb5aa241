mod printer;
mod reader;

use calc_lang_interpreter::Evaluator;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use printer::Printer;
use reader::{ReadOutput, Reader};

const BANNER: &str = "calc-lang. A command line calculator";

struct Repl {
    reader: Reader,
    evaluator: Evaluator,
    printer: Printer,
}

impl Repl {
    fn run(mut self) -> Result<(), ReadlineError> {
        loop {
            match self.reader.read()? {
                ReadOutput::Exit => break,
                ReadOutput::Clear => continue,
                ReadOutput::Value(line) => {
                    let result = self.evaluator.evaluate(&line);
                    self.printer.print(&result)
                }
            }
        }
        Ok(())
    }
}

pub fn start(quiet: bool) -> Result<(), ReadlineError> {
    let rl = DefaultEditor::new()?;

    if !quiet {
        println!("{}", BANNER);
    }

    Repl {
        reader: Reader::new(rl),
        evaluator: Evaluator::new(),
        printer: Printer {},
    }
    .run()
}
