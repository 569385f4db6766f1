use chrono::Local;
use lunisolar::{ChineseCalendar, CivilDateTime};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cal = ChineseCalendar::default();
    let today = CivilDateTime::try_from(Local::now().naive_local())?;

    let info = cal.day_info(&today)?;
    println!("Civil:   {}", info.date);
    println!("Lunar:   {} ({})", info.lunar, info.zodiac_name());
    println!("Pillars: {}", info.pillars);
    if let Some(term) = info.solar_term {
        println!("Term:    {term}");
    }

    let leap = cal.leap_month(today.year())?;
    println!("Leap month of {}: {leap:?}", today.year());

    for item in cal.solar_terms(today.year())?.iter() {
        println!("  {item}");
    }
    Ok(())
}
