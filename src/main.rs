use joint::JointRange;
use joint::RangeError;

fn print_rows(numbers: &[i32], strings: &[&str]) {
    for (number, string) in numbers.iter().zip(strings) {
        println!("{number} {string}");
    }
    println!();
}

fn main() -> Result<(), RangeError> {
    let mut numbers = vec![4, 3, 2, 1, 0];
    let mut strings = vec!["four", "three", "two", "one", "zero"];
    print_rows(&numbers, &strings);

    JointRange::new((&mut numbers[..], &mut strings[..]))?.sort();
    println!("Sorted by values:");
    print_rows(&numbers, &strings);

    JointRange::new((&mut numbers[..], &mut strings[..]))?
        .sort_by(|a, b| a.get::<1>() < b.get::<1>());
    println!("Sorted by strings:");
    print_rows(&numbers, &strings);

    return Ok(());
}
