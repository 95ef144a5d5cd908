#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&len_iv, rest)) = data.split_first() else {
        return;
    };

    let mut single = rest.to_vec();
    if let Ok(len) = hayro_charstring::decrypt(i32::from(len_iv), &mut single) {
        assert_eq!(len + usize::from(len_iv), rest.len());
    }

    let mut double = rest.to_vec();
    let _ = hayro_charstring::decrypt_double(i32::from(len_iv), &mut double);
});
