#![no_main]
use libfuzzer_sys::fuzz_target;

use datapack::Project;

fuzz_target!(|data: &[u8]| {
    let mut project = Project::new("fuzz");
    if project.import_archive(data).is_ok() {
        // Whatever came in must go back out.
        let _outcome = project.export_archive().unwrap();
    }
});
