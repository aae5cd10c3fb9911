//! Not really a shell: serializes through the wire codec verbatim, for
//! embedding state in another process's environment.

use crate::codec;
use crate::env::Env;
use crate::export::ShellExport;

pub fn export(e: &ShellExport) -> String {
    codec::encode(e)
}

pub fn dump(env: &Env) -> String {
    codec::encode(env)
}
