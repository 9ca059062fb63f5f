use miette::Result;
use version_gate::run;

fn main() -> Result<()> {
    run()
}
